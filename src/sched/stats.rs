//! Estatísticas finais do escalonador

use crate::core::trace::{Event, EventSink};

use super::scheduler::Scheduler;

/// Resumo numérico de uma execução
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub quantum: u32,
    /// Processos terminados (todos os carregados, ao fim de `run`)
    pub processes: usize,
    /// Soma das interrupções de todos os processos
    pub total_interruptions: u64,
    pub context_switches: u64,
    pub slices: u64,
    pub instructions_in_slices: u64,
    pub idle_ticks: u64,
}

impl Statistics {
    pub fn collect<S: EventSink>(sched: &Scheduler<S>) -> Self {
        let terminated = sched.terminated();
        Self {
            quantum: sched.quantum(),
            processes: terminated.len(),
            total_interruptions: terminated
                .iter()
                .map(|p| p.accounting.interruptions)
                .sum(),
            context_switches: sched.context_switches(),
            slices: sched.slices(),
            instructions_in_slices: sched.instructions_in_slices(),
            idle_ticks: sched.idle_ticks(),
        }
    }

    /// Média de trocas (interrupções) por processo
    pub fn average_switches(&self) -> f64 {
        if self.processes == 0 {
            return 0.0;
        }
        self.total_interruptions as f64 / self.processes as f64
    }

    /// Média de instruções executadas por quantum
    pub fn average_instructions(&self) -> f64 {
        if self.slices == 0 {
            return 0.0;
        }
        self.instructions_in_slices as f64 / self.slices as f64
    }

    pub fn record_into<S: EventSink + ?Sized>(&self, sink: &mut S) {
        sink.record(&Event::Statistics {
            average_switches: self.average_switches(),
            average_instructions: self.average_instructions(),
            quantum: self.quantum,
        });
    }
}
