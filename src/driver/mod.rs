//! Render/loop driver
//!
//! Couples the fixed simulation tick rate to whatever rate frames arrive at.
//! Each frame runs the ticks that have come due, then renders the board
//! interpolated by the time left over.
//!
//! The host supplies three capabilities: a [`FrameScheduler`] to request
//! and cancel frames, a [`Clock`] for timestamps, and a [`ViewPresenter`]
//! to show the results.

pub mod clock;
pub mod loop_driver;
pub mod presenter;
pub mod scheduler;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use loop_driver::{LoopDriver, PendingSubmission};
pub use presenter::{BoardFrame, ViewPresenter};
pub use scheduler::{FrameHandle, FrameScheduler, FrameSlot};
