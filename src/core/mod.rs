//! Core Module
//!
//! Infraestrutura comum: logging de console e trace de eventos.

pub mod logging;
pub mod trace;
