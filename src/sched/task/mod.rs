//! Process management module

pub mod accounting;
pub mod entity;
pub mod state;
pub use crate::sys::Pid;
pub use accounting::Accounting;
pub use entity::{ProcessControlBlock, Registers, StepOutcome};
pub use state::ProcessState;
