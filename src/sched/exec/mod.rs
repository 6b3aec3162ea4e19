//! Programas: decodificação de instruções e carga de arquivos

pub mod instruction;
pub mod loader;

pub use instruction::{Instruction, Register};
pub use loader::{parse_program, Program, ProgramLoader};
