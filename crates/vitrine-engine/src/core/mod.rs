//! Contracts between the runtime loop and the demo applications.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
