//! Overlay state types.
//!
//! Pure domain logic - no windowing, no platform dependencies.

use serde::{Deserialize, Serialize};

/// The most recent application lifecycle transition delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// The app is the active, foreground surface.
    #[default]
    Active,

    /// The app is about to resign (or has resigned) the foreground.
    Inactive,
}

impl LifecyclePhase {
    pub fn is_inactive(&self) -> bool {
        matches!(self, LifecyclePhase::Inactive)
    }
}

/// Capability flag plus derived cover visibility.
///
/// `enabled` is set by the host application; `visible` is derived from the
/// most recent lifecycle event and `enabled`. Invariant: `visible` is true
/// only while the app is backgrounded AND the capability was enabled at
/// that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverlayState {
    /// Capability toggle controlled by the application layer.
    pub enabled: bool,

    /// Whether the cover surface is currently shown.
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_inert() {
        let state = OverlayState::default();
        assert!(!state.enabled);
        assert!(!state.visible);
        assert_eq!(LifecyclePhase::default(), LifecyclePhase::Active);
    }

    #[test]
    fn test_state_serializes_for_command_acks() {
        let state = OverlayState {
            enabled: true,
            visible: false,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["visible"], false);
    }
}
