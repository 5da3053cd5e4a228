//! Error types for the application shell.

use hand_gesture::PoseError;
use thiserror::Error;

/// A pose source failed to produce this frame's pose.
///
/// The frame loop logs these and carries on as if no body was detected.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("malformed pose: {0}")]
    Pose(#[from] PoseError),

    #[error("pose inference failed: {0}")]
    Inference(String),
}

/// Failures that end the application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error("inference worker disconnected")]
    WorkerDisconnected,
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e.to_string())
    }
}
