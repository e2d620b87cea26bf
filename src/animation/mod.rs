//! Frame-driven animation plumbing.
//!
//! The host owns the display refresh signal and forwards each refresh to
//! [`FrameScheduler::dispatch`]; the scheduler decides whether a tick fires.

mod scheduler;
mod state;

pub use scheduler::{CancellationToken, FrameScheduler, SchedulerState, TickDecision};
pub use state::AnimationState;
