//! WebKit backend: resolve and rewrite the engine's content view.
//!
//! WKWebView draws page content in a private view nested inside its
//! scroll view; the view's class name starts with `WKContent` but is
//! otherwise version-dependent, so it is resolved from a live instance
//! rather than by a hardcoded name. Two of its instance methods gate
//! programmatic focus:
//!
//! - the element-focus handler, whose `userIsInteracting:` argument
//!   decides whether script-driven focus is honored, and
//! - `_requiresKeyboardWhenFirstResponder`, which decides whether taking
//!   focus raises the keyboard.
//!
//! Both are rewritten at the class level, routing through the policy in
//! [`crate::decorator`]. Everything needed for the rewrite is resolved
//! before either method is touched, so a surface that cannot be fully
//! resolved is left completely stock.

use std::ffi::c_void;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

use objc::runtime::{
    method_setImplementation, object_getClass, Class, Imp, Method, Object, Sel, BOOL, NO, YES,
};
use objc::{msg_send, sel, sel_impl};

use crate::decorator;
use crate::error::PatchError;
use crate::installer::{install_once, ContentViewPatch, InstallOutcome, SurfaceIntrospection};

/// Class-name prefix shared by every generation of the content view.
const CONTENT_VIEW_PREFIX: &str = "WKContent";

/// Element-focus gate, newest spelling first.
const FOCUS_GATE_SELECTORS: [&str; 2] = [
    "_elementDidFocus:userIsInteracting:blurPreviousNode:activityStateChanges:userObject:",
    "_startAssistingNode:userIsInteracting:blurPreviousNode:changingActivityState:userObject:",
];

/// Keyboard gate, stable across engine versions.
const KEYBOARD_GATE_SELECTOR: &str = "_requiresKeyboardWhenFirstResponder";

/// Original element-focus implementation, stored before the swap so the
/// trampoline always finds a valid target.
static ORIGINAL_FOCUS_GATE: AtomicUsize = AtomicUsize::new(0);

/// Shape shared by both focus-gate generations. The argument after the
/// two flags differs in meaning between generations but is pointer-sized
/// in each; it is forwarded untouched.
type FocusGateFn =
    unsafe extern "C" fn(*mut Object, Sel, *mut Object, BOOL, BOOL, usize, *mut Object);

/// A live WKWebView to resolve engine internals from.
pub struct WkSurface {
    web_view: *mut Object,
}

impl WkSurface {
    /// # Safety
    ///
    /// `web_view` must be null or point to a live `WKWebView`.
    pub unsafe fn new(web_view: *mut c_void) -> Self {
        Self {
            web_view: web_view.cast(),
        }
    }
}

impl SurfaceIntrospection for WkSurface {
    type Patch = WkContentViewPatch;

    fn content_view(&self) -> Result<WkContentViewPatch, PatchError> {
        unsafe { resolve_content_view(self.web_view) }
    }
}

/// Fully resolved handle onto the content view class: both gate methods
/// are already looked up, so the rewrites themselves cannot miss.
pub struct WkContentViewPatch {
    class_name: String,
    focus_selector: &'static str,
    focus_method: *mut Method,
    keyboard_method: *mut Method,
}

impl ContentViewPatch for WkContentViewPatch {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn force_gesture_qualification(&mut self) -> Result<(), PatchError> {
        unsafe {
            let method: &Method = &*self.focus_method;
            // Store the original before the swap; the trampoline may run
            // the instant the new implementation is visible.
            ORIGINAL_FOCUS_GATE.store(method.implementation() as usize, Ordering::SeqCst);
            let imp: Imp = mem::transmute(focus_gate_trampoline as FocusGateFn);
            method_setImplementation(self.focus_method, imp);
        }
        tracing::debug!(
            class = %self.class_name,
            selector = self.focus_selector,
            "focus gesture gate rewritten"
        );
        Ok(())
    }

    fn force_keyboard_display(&mut self) -> Result<(), PatchError> {
        unsafe {
            let imp: Imp = mem::transmute(
                keyboard_gate_trampoline as unsafe extern "C" fn(*mut Object, Sel) -> BOOL,
            );
            method_setImplementation(self.keyboard_method, imp);
        }
        tracing::debug!(
            class = %self.class_name,
            selector = KEYBOARD_GATE_SELECTOR,
            "keyboard gate rewritten"
        );
        Ok(())
    }
}

/// Install the process-wide focus patch, resolving engine internals from
/// `web_view`.
///
/// # Safety
///
/// `web_view` must be null (degrades to
/// [`InstallOutcome::Unavailable`]) or point to a live `WKWebView`.
/// Must be called on the main thread, where the view hierarchy may be
/// walked.
pub unsafe fn install_for_web_view(web_view: *mut c_void) -> InstallOutcome {
    install_once(&WkSurface::new(web_view))
}

/// Replacement element-focus handler: delegate to the engine with the
/// user-interaction flag forced on, everything else untouched.
unsafe extern "C" fn focus_gate_trampoline(
    this: *mut Object,
    cmd: Sel,
    node: *mut Object,
    _user_is_interacting: BOOL,
    blur_previous: BOOL,
    activity_state: usize,
    user_object: *mut Object,
) {
    // Non-zero from the store in force_gesture_qualification.
    let original: FocusGateFn = mem::transmute(ORIGINAL_FOCUS_GATE.load(Ordering::SeqCst));
    // The selector returns void, so the qualification verdict is dropped.
    let _ = decorator::qualify_focus_gesture(|interacting| {
        let flag = if interacting { YES } else { NO };
        // The pointer was read from the method table before the swap.
        unsafe { original(this, cmd, node, flag, blur_previous, activity_state, user_object) };
    });
}

/// Replacement keyboard gate: the original is never consulted.
unsafe extern "C" fn keyboard_gate_trampoline(_this: *mut Object, _cmd: Sel) -> BOOL {
    if decorator::allow_keyboard_display() {
        YES
    } else {
        NO
    }
}

unsafe fn resolve_content_view(web_view: *mut Object) -> Result<WkContentViewPatch, PatchError> {
    if web_view.is_null() {
        return Err(PatchError::ContentViewNotFound);
    }

    // [webView respondsToSelector:@selector(scrollView)]; absent where
    // the web view is not scroll-view backed (e.g. AppKit).
    let responds: BOOL = msg_send![web_view, respondsToSelector: sel!(scrollView)];
    if responds == NO {
        return Err(PatchError::ContentViewNotFound);
    }

    // [webView scrollView]
    let scroll_view: *mut Object = msg_send![web_view, scrollView];
    if scroll_view.is_null() {
        return Err(PatchError::ContentViewNotFound);
    }

    // [scrollView subviews]
    let subviews: *mut Object = msg_send![scroll_view, subviews];
    if subviews.is_null() {
        return Err(PatchError::ContentViewNotFound);
    }

    let count: usize = msg_send![subviews, count];
    for index in 0..count {
        let subview: *mut Object = msg_send![subviews, objectAtIndex: index];
        if subview.is_null() {
            continue;
        }
        let cls = object_getClass(subview);
        if cls.is_null() {
            continue;
        }
        let cls: &Class = &*cls;
        if is_content_view_class(cls.name()) {
            return build_patch(cls);
        }
    }

    Err(PatchError::ContentViewNotFound)
}

fn is_content_view_class(name: &str) -> bool {
    name.starts_with(CONTENT_VIEW_PREFIX)
}

/// Look up both gate methods. Nothing is mutated here; a miss on either
/// leaves the class untouched.
fn build_patch(cls: &Class) -> Result<WkContentViewPatch, PatchError> {
    let (focus_selector, focus_method) = resolve_focus_gate(cls)?;
    let keyboard_method = cls
        .instance_method(Sel::register(KEYBOARD_GATE_SELECTOR))
        .ok_or(PatchError::SelectorNotFound(KEYBOARD_GATE_SELECTOR))?;

    Ok(WkContentViewPatch {
        class_name: cls.name().to_string(),
        focus_selector,
        focus_method: focus_method as *const Method as *mut Method,
        keyboard_method: keyboard_method as *const Method as *mut Method,
    })
}

fn resolve_focus_gate(cls: &Class) -> Result<(&'static str, &Method), PatchError> {
    for selector in FOCUS_GATE_SELECTORS {
        if let Some(method) = cls.instance_method(Sel::register(selector)) {
            return Ok((selector, method));
        }
    }
    Err(PatchError::SelectorNotFound(FOCUS_GATE_SELECTORS[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::PatchGuard;
    use crate::installer::install_once_with;

    #[test]
    fn test_content_view_class_matching() {
        assert!(is_content_view_class("WKContentView"));
        assert!(is_content_view_class("WKContentView_WithObservedValue"));
        assert!(!is_content_view_class("WKScrollView"));
        assert!(!is_content_view_class("UIView"));
    }

    #[test]
    fn test_null_web_view_degrades() {
        let guard = PatchGuard::new();
        let surface = unsafe { WkSurface::new(std::ptr::null_mut()) };
        assert_eq!(
            install_once_with(&guard, &surface),
            InstallOutcome::Unavailable
        );
        assert!(!guard.is_installed());
    }
}
