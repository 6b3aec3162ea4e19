//! # Trace de Eventos do Escalonador
//!
//! Registra, linha a linha, o que o escalonador fez: carga, execução,
//! interrupções, E/S, término e estatísticas finais. É a SAÍDA da simulação,
//! separada dos logs de diagnóstico do console (`core::logging`).
//!
//! ## Formato
//! ```text
//! Carregando TESTE-1
//! Executando TESTE-1
//! Interrompendo TESTE-1 após 2 instruções
//! E/S iniciada em TESTE-1
//! TESTE-1 terminado. A=1. B=2. C=0. D=0
//! MÉDIA DE TROCAS: 2.50
//! MÉDIA DE INSTRUÇÕES: 1.40
//! QUANTUM: 2
//! ```
//!
//! O arquivo recebe o nome `logNN_<millis>.txt` (NN = quantum com 2 dígitos),
//! para não sobrescrever execuções anteriores.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::sched::task::Registers;
use crate::sys::{Result, SchedError};

bitflags! {
    /// Categorias de evento gravadas no trace
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TraceEvents: u8 {
        const LOADED      = 1 << 0;
        const EXECUTING   = 1 << 1;
        const INTERRUPTED = 1 << 2;
        const IO          = 1 << 3;
        const TERMINATED  = 1 << 4;
        const STATISTICS  = 1 << 5;
        const ERRORS      = 1 << 6;

        /// Apenas resultado final
        const SUMMARY = Self::TERMINATED.bits() | Self::STATISTICS.bits() | Self::ERRORS.bits();
        const ALL = Self::LOADED.bits()
            | Self::EXECUTING.bits()
            | Self::INTERRUPTED.bits()
            | Self::IO.bits()
            | Self::SUMMARY.bits();
    }
}

impl Default for TraceEvents {
    fn default() -> Self {
        Self::ALL
    }
}

/// Evento do escalonador
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    Loaded { name: &'a str },
    Executing { name: &'a str },
    Interrupted { name: &'a str, executed: u32 },
    IoStarted { name: &'a str },
    Terminated { name: &'a str, registers: Registers },
    Statistics {
        average_switches: f64,
        average_instructions: f64,
        quantum: u32,
    },
    Error { message: &'a str },
}

impl Event<'_> {
    /// Categoria usada no filtro
    pub fn kind(&self) -> TraceEvents {
        match self {
            Self::Loaded { .. } => TraceEvents::LOADED,
            Self::Executing { .. } => TraceEvents::EXECUTING,
            Self::Interrupted { .. } => TraceEvents::INTERRUPTED,
            Self::IoStarted { .. } => TraceEvents::IO,
            Self::Terminated { .. } => TraceEvents::TERMINATED,
            Self::Statistics { .. } => TraceEvents::STATISTICS,
            Self::Error { .. } => TraceEvents::ERRORS,
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { name } => write!(f, "Carregando {name}"),
            Self::Executing { name } => write!(f, "Executando {name}"),
            Self::Interrupted { name, executed } => {
                write!(f, "Interrompendo {name} após {executed} instruções")
            }
            Self::IoStarted { name } => write!(f, "E/S iniciada em {name}"),
            Self::Terminated { name, registers: r } => write!(
                f,
                "{name} terminado. A={}. B={}. C={}. D={}",
                r.a, r.b, r.c, r.d
            ),
            Self::Statistics {
                average_switches,
                average_instructions,
                quantum,
            } => {
                writeln!(f, "MÉDIA DE TROCAS: {average_switches:.2}")?;
                writeln!(f, "MÉDIA DE INSTRUÇÕES: {average_instructions:.2}")?;
                write!(f, "QUANTUM: {quantum}")
            }
            Self::Error { message } => write!(f, "[ERRO] {message}"),
        }
    }
}

/// Destino dos eventos do escalonador
pub trait EventSink {
    fn record(&mut self, event: &Event<'_>);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &Event<'_>) {
        (**self).record(event);
    }
}

/// Trace gravado em arquivo
pub struct TraceFile {
    path: PathBuf,
    writer: BufWriter<File>,
    filter: TraceEvents,
}

impl TraceFile {
    /// Cria `logs_dir/logNN_<millis>.txt`, criando o diretório se preciso
    pub fn create(logs_dir: &Path, quantum: u32, filter: TraceEvents) -> Result<Self> {
        fs::create_dir_all(logs_dir).map_err(|e| SchedError::io(logs_dir, e))?;

        let path = logs_dir.join(file_name(quantum, chrono::Utc::now().timestamp_millis()));
        let file = File::create(&path).map_err(|e| SchedError::io(&path, e))?;
        log::info!("(Trace) Gravando eventos em {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            filter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Descarrega o buffer e fecha o arquivo
    pub fn close(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .map_err(|e| SchedError::io(&self.path, e))?;
        Ok(self.path)
    }
}

impl EventSink for TraceFile {
    fn record(&mut self, event: &Event<'_>) {
        if !self.filter.intersects(event.kind()) {
            return;
        }
        // Flush por evento: um trace parcial ainda é útil se o processo morrer
        let res = writeln!(self.writer, "{event}").and_then(|_| self.writer.flush());
        if let Err(e) = res {
            log::error!(
                "(Trace) Erro ao escrever em {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Nome do arquivo de trace para um quantum
pub fn file_name(quantum: u32, millis: i64) -> String {
    format!("log{quantum:02}_{millis}.txt")
}

/// Trace em memória (testes e `--dry-run`)
#[derive(Debug, Default, Clone)]
pub struct MemoryTrace {
    lines: Vec<String>,
    filter: TraceEvents,
}

impl MemoryTrace {
    pub fn new() -> Self {
        Self::with_filter(TraceEvents::ALL)
    }

    pub fn with_filter(filter: TraceEvents) -> Self {
        Self {
            lines: Vec::new(),
            filter,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl EventSink for MemoryTrace {
    fn record(&mut self, event: &Event<'_>) {
        if self.filter.intersects(event.kind()) {
            let text = event.to_string();
            self.lines.extend(text.lines().map(str::to_string));
        }
    }
}
