//! Fila de processos prontos

use std::collections::VecDeque;

use crate::sched::task::ProcessControlBlock;

/// Fila de execução
#[derive(Debug, Default)]
pub struct RunQueue {
    /// Processos prontos (FIFO)
    queue: VecDeque<ProcessControlBlock>,
}

impl RunQueue {
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adiciona processo ao fim da fila
    pub fn push(&mut self, pcb: ProcessControlBlock) {
        self.queue.push_back(pcb);
    }

    /// Remove próximo processo
    pub fn pop(&mut self) -> Option<ProcessControlBlock> {
        self.queue.pop_front()
    }

    /// Número de processos na fila
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Verifica se está vazia
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
