//! # Escalonamento de Processos
//!
//! O módulo `sched` é o motor da simulação: transforma arquivos de programa em
//! processos (PCBs) e os executa numa CPU única com a política Round-Robin.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Abstração de Processo:** Define o que é um [`ProcessControlBlock`] e seu ciclo de vida.
//! - **Carga:** Decodifica os programas (`exec`) e atribui PIDs.
//! - **Política de Escalonamento:** Decide *quem* roda e *por quanto tempo* (Round-Robin com quantum fixo).
//! - **Contabilidade:** Produz as médias de trocas e de instruções por quantum.
//!
//! ## 🏗️ Pipeline de [`simulate`]
//! 1. Abre o trace (`logNN_<millis>.txt` ou memória, em `dry_run`).
//! 2. Carrega os `.txt` do diretório de programas em ordem alfabética.
//! 3. Enfileira os processos e roda o escalonador até esvaziar as filas.
//! 4. Grava as estatísticas no trace e fecha o arquivo.
//!
//! ## 🛠️ TODOs e Roadmap
//! - [ ] **TODO: (Feature)** Prioridades por processo (Feedback Queue) ao lado do Round-Robin.

pub mod config;
pub mod exec;
pub mod scheduler;
pub mod stats;
pub mod task;

use std::path::PathBuf;

use crate::core::trace::{EventSink, MemoryTrace, TraceFile};
use crate::sys::{Result, SchedError};

pub use config::SchedConfig;
pub use exec::ProgramLoader;
pub use scheduler::Scheduler;
pub use stats::Statistics;
pub use task::{ProcessControlBlock, ProcessState};

/// Onde o trace de uma execução foi parar
#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutput {
    File(PathBuf),
    Memory(Vec<String>),
}

/// Resultado de uma execução completa
#[derive(Debug, Clone)]
pub struct Report {
    pub trace: TraceOutput,
    pub statistics: Statistics,
    /// Processos na ordem em que terminaram
    pub terminated: Vec<ProcessControlBlock>,
}

/// Executa a simulação completa para `config.quantum`
pub fn simulate(config: &SchedConfig) -> Result<Report> {
    config.validate()?;

    if config.dry_run {
        let sink = MemoryTrace::with_filter(config.trace_filter);
        let (statistics, terminated, sink) = simulate_into(config, sink)?;
        return Ok(Report {
            trace: TraceOutput::Memory(sink.into_lines()),
            statistics,
            terminated,
        });
    }

    let sink = TraceFile::create(&config.logs_dir, config.quantum, config.trace_filter)?;
    let (statistics, terminated, sink) = simulate_into(config, sink)?;
    let path = sink.close()?;
    Ok(Report {
        trace: TraceOutput::File(path),
        statistics,
        terminated,
    })
}

/// Executa a simulação gravando os eventos em `sink`
pub fn simulate_into<S: EventSink>(
    config: &SchedConfig,
    mut sink: S,
) -> Result<(Statistics, Vec<ProcessControlBlock>, S)> {
    let processes = ProgramLoader::new().load_dir(&config.programs_dir, &mut sink)?;

    let mut sched = Scheduler::with_io_wait_factor(config.quantum, config.io_wait_factor, sink)?;
    for pcb in processes {
        sched.add_process(pcb);
    }
    sched.run();

    let statistics = Statistics::collect(&sched);
    statistics.record_into(sched.sink_mut());

    let (sink, terminated) = sched.into_parts();
    Ok((statistics, terminated, sink))
}

/// Roda a simulação para cada quantum em `1..=max_quantum`
///
/// Cada execução gera seu próprio trace. `max_quantum` abaixo de
/// [`config::QUANTUM_MIN`] é erro de configuração.
pub fn sweep(config: &SchedConfig, max_quantum: u32) -> Result<Vec<Report>> {
    if max_quantum < config::QUANTUM_MIN {
        return Err(SchedError::QuantumOutOfRange {
            value: i64::from(max_quantum),
        });
    }
    (config::QUANTUM_MIN..=max_quantum)
        .map(|q| simulate(&config.with_quantum(q)))
        .collect()
}
