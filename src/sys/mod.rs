//! System Definitions.
//!
//! Tipos e erros compartilhados por todos os subsistemas do simulador.

pub mod error;
pub mod types;

pub use error::{Result, SchedError};
pub use types::Pid;
