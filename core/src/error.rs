use thiserror::Error;

/// The failure of a caller supplied start or end action.
pub type ActionError = Box<dyn std::error::Error>;

/// Why an animation run did not complete.
#[derive(Debug, Error)]
pub enum AnimateError {
  /// The start action failed, the run was aborted before anything was armed.
  #[error("failed to start the animation: {0}")]
  Start(#[source] ActionError),
  /// The end action failed.
  #[error("failed to end the animation: {0}")]
  End(#[source] ActionError),
  /// The run was cancelled before the animation finished.
  #[error("the animation was cancelled before it finished")]
  Cancelled,
}
