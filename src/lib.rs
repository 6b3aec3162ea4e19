//! Escalonador Library.
//!
//! Simulador de escalonamento de processos Round-Robin.
//! Define a estrutura hierárquica do simulador.

// --- Módulos Centrais ---
pub mod core; // Logging de console e trace de eventos
pub mod sys; // Tipos e erros compartilhados

// --- Subsistemas ---
pub mod sched; // Scheduler, processos e programas

pub use crate::sched::{simulate, sweep, Report, SchedConfig, TraceOutput};
pub use crate::sys::{Result, SchedError};
