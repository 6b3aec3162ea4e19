//! # Escalonador Round-Robin
//!
//! Mantém:
//! - Uma fila de processos prontos ([`RunQueue`]).
//! - Uma fila de processos bloqueados em E/S ([`BlockedQueue`]).
//! - A lista de processos terminados, para estatísticas.
//!
//! ## Ciclo
//! A cada iteração o primeiro processo pronto recebe a CPU por até `quantum`
//! instruções. A fatia termina quando:
//! - o quantum esgota: o processo volta ao fim da fila de prontos;
//! - o processo executa `E/S`: fica bloqueado por `io_wait_factor * quantum` ticks;
//! - o programa acaba: o processo é terminado.
//!
//! Depois de cada iteração (com ou sem processo executando) a fila de
//! bloqueados avança um tick. O loop para quando as duas filas esvaziam.

pub mod blocked;
pub mod runqueue;

pub use blocked::BlockedQueue;
pub use runqueue::RunQueue;

use crate::core::trace::{Event, EventSink};
use crate::sched::config::{IO_WAIT_FACTOR, QUANTUM_MIN};
use crate::sched::task::{ProcessControlBlock, ProcessState, StepOutcome};
use crate::sys::{Result, SchedError};

/// Escalonador Round-Robin
pub struct Scheduler<S: EventSink> {
    ready: RunQueue,
    blocked: BlockedQueue,
    terminated: Vec<ProcessControlBlock>,
    quantum: u32,
    /// Ticks bloqueado após `E/S` (`io_wait_factor * quantum`)
    io_wait: u32,
    sink: S,

    /// Processos que receberam a CPU
    context_switches: u64,
    /// Fatias encerradas (para a média de instruções por quantum)
    slices: u64,
    instructions_in_slices: u64,
    /// Iterações sem nenhum processo pronto
    idle_ticks: u64,
}

impl<S: EventSink> Scheduler<S> {
    pub fn new(quantum: u32, sink: S) -> Result<Self> {
        Self::with_io_wait_factor(quantum, IO_WAIT_FACTOR, sink)
    }

    pub fn with_io_wait_factor(quantum: u32, io_wait_factor: u32, sink: S) -> Result<Self> {
        if quantum < QUANTUM_MIN {
            return Err(SchedError::QuantumOutOfRange {
                value: i64::from(quantum),
            });
        }
        let io_wait = io_wait_factor.saturating_mul(quantum);
        log::debug!("(Sched) Round-Robin quantum={} espera E/S={}", quantum, io_wait);

        Ok(Self {
            ready: RunQueue::new(),
            blocked: BlockedQueue::new(),
            terminated: Vec::new(),
            quantum,
            io_wait,
            sink,
            context_switches: 0,
            slices: 0,
            instructions_in_slices: 0,
            idle_ticks: 0,
        })
    }

    /// Adiciona processo à fila de prontos
    pub fn add_process(&mut self, mut pcb: ProcessControlBlock) {
        pcb.set_ready();
        self.sink.record(&Event::Loaded { name: &pcb.name });
        log::trace!("(Sched) Nova tarefa na RunQueue PID {}", pcb.pid);
        self.ready.push(pcb);
    }

    /// Executa até que todos os processos terminem
    pub fn run(&mut self) {
        log::info!(
            "(Sched) Iniciando com {} processo(s), quantum {}",
            self.ready.len() + self.blocked.len(),
            self.quantum
        );

        while !self.ready.is_empty() || !self.blocked.is_empty() {
            match self.ready.pop() {
                Some(pcb) => {
                    self.context_switches += 1;
                    self.dispatch(pcb);
                }
                None => {
                    self.idle_ticks += 1;
                    log::trace!("(Sched) CPU ociosa, {} bloqueado(s)", self.blocked.len());
                }
            }
            self.tick_blocked();
        }

        log::info!(
            "(Sched) Fim: {} terminado(s), {} troca(s), {} tick(s) ocioso(s)",
            self.terminated.len(),
            self.context_switches,
            self.idle_ticks
        );
    }

    /// Executa uma fatia de tempo de `pcb`
    fn dispatch(&mut self, mut pcb: ProcessControlBlock) {
        pcb.state = ProcessState::Running;
        pcb.accounting.start_slice();
        self.sink.record(&Event::Executing { name: &pcb.name });

        let mut executed = 0u32;
        let mut blocked = false;
        while executed < self.quantum && !pcb.is_finished() {
            match pcb.step() {
                StepOutcome::Continue => executed += 1,
                StepOutcome::Io => {
                    blocked = true;
                    break;
                }
            }
        }

        self.slices += 1;
        self.instructions_in_slices += u64::from(executed);
        pcb.accounting.end_slice(executed);

        if blocked {
            pcb.set_blocked(self.io_wait);
            self.sink.record(&Event::Interrupted {
                name: &pcb.name,
                executed,
            });
            self.sink.record(&Event::IoStarted { name: &pcb.name });
            log::debug!(
                "(Sched) PID {} bloqueado por {} tick(s)",
                pcb.pid,
                pcb.wait_time
            );
            self.blocked.add(pcb);
        } else if pcb.is_finished() {
            pcb.state = ProcessState::Terminated;
            self.sink.record(&Event::Terminated {
                name: &pcb.name,
                registers: pcb.registers,
            });
            log::debug!("(Sched) PID {} terminado", pcb.pid);
            self.terminated.push(pcb);
        } else {
            pcb.set_ready();
            self.sink.record(&Event::Interrupted {
                name: &pcb.name,
                executed,
            });
            self.ready.push(pcb);
        }
    }

    fn tick_blocked(&mut self) {
        for pcb in self.blocked.tick() {
            self.ready.push(pcb);
        }
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    pub fn io_wait(&self) -> u32 {
        self.io_wait
    }

    pub fn terminated(&self) -> &[ProcessControlBlock] {
        &self.terminated
    }

    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    pub fn slices(&self) -> u64 {
        self.slices
    }

    pub fn instructions_in_slices(&self) -> u64 {
        self.instructions_in_slices
    }

    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Desmonta o escalonador devolvendo o trace e os processos terminados
    pub fn into_parts(self) -> (S, Vec<ProcessControlBlock>) {
        (self.sink, self.terminated)
    }
}
