//! # pose_confetti
//!
//! Raise a hand quickly and stop: confetti bursts out of it.
//!
//! Each frame the application asks a [`source::PoseSource`] for a body pose,
//! feeds it to the [`hand_gesture::HandTracker`] and then to the
//! [`confetti_burst::ConfettiSimulator`], and draws the result.
//!
//! ## Frame loop
//!
//! | Step | Where | Notes |
//! |---|---|---|
//! | Poll window input | [`visualizer::Visualizer::poll_input`] | Mouse and keys become [`source::SimInput`] |
//! | Request a pose | [`source::InferenceWorker::request`] | At most one request in flight |
//! | Wait for the pose | [`source::InferenceWorker::wait`] | The only blocking point; throttles the loop |
//! | Advance the clock | [`hand_gesture::FrameClock::tick`] | |
//! | Tracker, then simulator | [`app::AppState::step`] | Bursts launch on the tick a gesture fires |
//! | Render | [`visualizer::Visualizer::render`] | Reads buffers after the tick's writes |
//!
//! ## Pose sources
//!
//! * (default): **Simulation mode**: a synthetic standing figure whose hands
//!   follow the mouse.
//! * `--demo`: a scripted raise-and-stop of the left hand, looping.
//! * `--headless`: the scripted demo without a window, events logged.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Hold left button | Left hand follows the pointer |
//! | Hold right button | Right hand follows the pointer |
//! | `Space` | Toggle the body in and out of view |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod error;
pub mod source;
pub mod visualizer;

pub use app::{run, run_headless, AppConfig, AppState, HeadlessReport};
pub use error::{AppError, SourceError};
pub use source::{
    raise_hand_script, standing_figure, InferenceWorker, PoseSource, ScriptedPoseSource,
    SimInput, SimPoseSource,
};
