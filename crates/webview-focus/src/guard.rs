//! One-shot install latch.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide latch that makes patch installation idempotent.
///
/// The patch rewrites class-level method tables, so it must run at most
/// once per process no matter how many web views are created or how many
/// threads race to install it.
pub struct PatchGuard {
    installed: AtomicBool,
}

impl PatchGuard {
    pub const fn new() -> Self {
        Self {
            installed: AtomicBool::new(false),
        }
    }

    /// Whether the patch has been installed in this process.
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Claim the install slot. Returns `true` for exactly one caller.
    pub fn try_claim(&self) -> bool {
        self.installed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Give the slot back after a failed install so a later attempt
    /// (e.g. against a different web view) can retry.
    pub fn release(&self) {
        self.installed.store(false, Ordering::SeqCst);
    }
}

impl Default for PatchGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// The latch for the real engine patch. Shared by every install path in
/// the process.
pub static INSTALL_GUARD: PatchGuard = PatchGuard::new();
