//! Input subsystem: terminal events in, session actions out.

pub mod raw;
pub mod service;

pub use raw::ScrollDirection;
pub use service::{InputAction, InputMode, InputService, InputStateMachine};
