//! Conjunto de instruções dos programas simulados
//!
//! Cada linha de um programa (depois do nome) é uma instrução:
//!
//! | Texto    | Efeito                                       |
//! |----------|----------------------------------------------|
//! | `A=10`   | Atribui 10 ao registrador A (também B, C, D) |
//! | `COM`    | Comando genérico, apenas consome CPU         |
//! | `E/S`    | Inicia E/S e bloqueia o processo             |
//! | `SAIDA`  | Encerra o programa                           |

use std::fmt;

use crate::sys::{Result, SchedError};

/// Registradores de propósito geral do processo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    B,
    C,
    D,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::A, Register::B, Register::C, Register::D];

    const fn from_prefix(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

/// Instrução decodificada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `X=<valor>`
    Assign(Register, i32),
    /// `COM`
    Com,
    /// `E/S`
    Io,
    /// `SAIDA`
    Exit,
}

impl Instruction {
    /// Decodifica uma linha de programa.
    ///
    /// `line` é o número da linha no arquivo (base 1), usado nas mensagens de erro.
    /// Retorna `Ok(None)` para linhas em branco.
    pub fn parse(text: &str, line: usize) -> Result<Option<Self>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let instr = match text {
            "COM" => Self::Com,
            "E/S" => Self::Io,
            "SAIDA" => Self::Exit,
            _ => {
                let mut chars = text.chars();
                let reg = chars.next().and_then(Register::from_prefix);
                match (reg, chars.next()) {
                    (Some(reg), Some('=')) => {
                        let value = chars.as_str().parse::<i32>().map_err(|_| {
                            SchedError::InvalidValue {
                                line,
                                text: text.to_string(),
                            }
                        })?;
                        Self::Assign(reg, value)
                    }
                    _ => {
                        return Err(SchedError::UnknownInstruction {
                            line,
                            text: text.to_string(),
                        })
                    }
                }
            }
        };

        Ok(Some(instr))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign(reg, value) => write!(f, "{}={}", reg.as_char(), value),
            Self::Com => f.write_str("COM"),
            Self::Io => f.write_str("E/S"),
            Self::Exit => f.write_str("SAIDA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_opcode() {
        assert_eq!(
            Instruction::parse("A=10", 1).unwrap(),
            Some(Instruction::Assign(Register::A, 10))
        );
        assert_eq!(
            Instruction::parse("D=-7", 1).unwrap(),
            Some(Instruction::Assign(Register::D, -7))
        );
        assert_eq!(Instruction::parse("COM", 1).unwrap(), Some(Instruction::Com));
        assert_eq!(Instruction::parse("E/S", 1).unwrap(), Some(Instruction::Io));
        assert_eq!(Instruction::parse("SAIDA", 1).unwrap(), Some(Instruction::Exit));
    }

    #[test]
    fn trims_and_skips_blank_lines() {
        assert_eq!(
            Instruction::parse("  B=3\r", 2).unwrap(),
            Some(Instruction::Assign(Register::B, 3))
        );
        assert_eq!(Instruction::parse("   ", 2).unwrap(), None);
    }

    #[test]
    fn unknown_text_reports_line() {
        match Instruction::parse("MOV A", 5) {
            Err(SchedError::UnknownInstruction { line, text }) => {
                assert_eq!(line, 5);
                assert_eq!(text, "MOV A");
            }
            other => panic!("esperava UnknownInstruction, veio {other:?}"),
        }
        // Registrador inexistente e opcodes em minúsculas também são desconhecidos
        assert!(Instruction::parse("X=1", 1).is_err());
        assert!(Instruction::parse("com", 1).is_err());
    }

    #[test]
    fn bad_register_value() {
        assert!(matches!(
            Instruction::parse("C=dez", 9),
            Err(SchedError::InvalidValue { line: 9, .. })
        ));
        assert!(matches!(
            Instruction::parse("A=99999999999", 1),
            Err(SchedError::InvalidValue { .. })
        ));
    }

    #[test]
    fn display_is_canonical_text() {
        assert_eq!(Instruction::Assign(Register::C, 42).to_string(), "C=42");
        assert_eq!(Instruction::Io.to_string(), "E/S");
    }
}
