//! Constantes e configuração do Scheduler

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::trace::TraceEvents;
use crate::sys::{Result, SchedError};

/// Quantum mínimo aceito (quantum 0 nunca avança nenhum processo)
pub const QUANTUM_MIN: u32 = 1;

/// Multiplicador do quantum para o tempo de espera de E/S
pub const IO_WAIT_FACTOR: u32 = 2;

/// Arquivo com o valor do quantum
pub const DEFAULT_QUANTUM_FILE: &str = "resources/quantum/quantum.txt";

/// Diretório com os programas (um processo por .txt)
pub const DEFAULT_PROGRAMS_DIR: &str = "resources/inserts";

/// Diretório onde os arquivos de trace são criados
pub const DEFAULT_LOGS_DIR: &str = "resources/logs";

/// Configuração de uma execução da simulação
#[derive(Debug, Clone)]
pub struct SchedConfig {
    /// Instruções por fatia de tempo
    pub quantum: u32,
    /// Tempo bloqueado em E/S = `io_wait_factor * quantum` ticks
    pub io_wait_factor: u32,
    pub programs_dir: PathBuf,
    pub logs_dir: PathBuf,
    /// Eventos gravados no trace
    pub trace_filter: TraceEvents,
    /// Grava o trace apenas em memória
    pub dry_run: bool,
}

impl SchedConfig {
    pub fn new(quantum: u32) -> Self {
        Self {
            quantum,
            io_wait_factor: IO_WAIT_FACTOR,
            programs_dir: PathBuf::from(DEFAULT_PROGRAMS_DIR),
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            trace_filter: TraceEvents::ALL,
            dry_run: false,
        }
    }

    /// Mesma configuração com outro quantum (usado no modo sweep)
    pub fn with_quantum(&self, quantum: u32) -> Self {
        Self {
            quantum,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_quantum(i64::from(self.quantum)).map(|_| ())
    }
}

/// Lê o quantum de um arquivo texto contendo um único inteiro
pub fn load_quantum(path: &Path) -> Result<u32> {
    let content = fs::read_to_string(path).map_err(|e| SchedError::io(path, e))?;
    let quantum = parse_quantum(&content)?;
    log::debug!("(Config) Quantum lido de {}: {}", path.display(), quantum);
    Ok(quantum)
}

/// Converte o texto do arquivo de quantum
pub fn parse_quantum(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value: i64 = trimmed.parse().map_err(|_| SchedError::InvalidQuantum {
        text: trimmed.to_string(),
    })?;
    check_quantum(value)
}

fn check_quantum(value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(q) if q >= QUANTUM_MIN => Ok(q),
        _ => Err(SchedError::QuantumOutOfRange { value }),
    }
}
