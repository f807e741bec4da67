use thiserror::Error;

/// Reasons the focus patch could not be installed.
///
/// All of these degrade to "web view keeps stock behavior"; none of them
/// are fatal to the app.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The engine's internal content view could not be located in the
    /// live view hierarchy.
    #[error("web content view not found in view hierarchy")]
    ContentViewNotFound,

    /// The resolved content view class does not implement a method the
    /// patch needs to rewrite.
    #[error("content view does not respond to `{0}`")]
    SelectorNotFound(&'static str),

    /// No patchable web surface exists on this platform.
    #[error("web focus patch is not supported on this platform")]
    Unsupported,
}
