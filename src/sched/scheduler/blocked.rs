//! Blocked Queue - Gerencia processos aguardando E/S
//!
//! Cada tick do escalonador decrementa o tempo de espera de todos os
//! processos bloqueados; os que chegam a zero voltam a ficar prontos.

use std::collections::VecDeque;

use crate::sched::task::{ProcessControlBlock, ProcessState};

/// Fila de processos bloqueados
#[derive(Debug, Default)]
pub struct BlockedQueue {
    queue: VecDeque<ProcessControlBlock>,
}

impl BlockedQueue {
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn add(&mut self, pcb: ProcessControlBlock) {
        debug_assert_eq!(pcb.state, ProcessState::Blocked);
        self.queue.push_back(pcb);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Avança um tick e retorna, em ordem, os processos que acordaram
    ///
    /// Quem continua bloqueado mantém a ordem relativa.
    pub fn tick(&mut self) -> Vec<ProcessControlBlock> {
        let mut woken = Vec::new();

        for _ in 0..self.queue.len() {
            let Some(mut pcb) = self.queue.pop_front() else {
                break;
            };
            pcb.wait_time = pcb.wait_time.saturating_sub(1);
            if pcb.wait_time == 0 {
                log::debug!("(Blocked) Acordando PID {} ({})", pcb.pid, pcb.name);
                pcb.set_ready();
                woken.push(pcb);
            } else {
                self.queue.push_back(pcb);
            }
        }

        woken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::Pid;

    fn blocked(pid: u32, wait: u32) -> ProcessControlBlock {
        let mut pcb = ProcessControlBlock::new(Pid::new(pid), format!("P{pid}"), Vec::new());
        pcb.set_blocked(wait);
        pcb
    }

    #[test]
    fn tick_wakes_in_order_and_keeps_rest() {
        let mut q = BlockedQueue::new();
        q.add(blocked(1, 2));
        q.add(blocked(2, 1));
        q.add(blocked(3, 3));
        q.add(blocked(4, 1));

        let woken: Vec<_> = q.tick().into_iter().map(|p| p.pid.as_u32()).collect();
        assert_eq!(woken, [2, 4]);
        assert_eq!(q.len(), 2);

        let woken = q.tick();
        assert_eq!(woken.len(), 1);
        assert_eq!(woken[0].pid, Pid::new(1));
        assert_eq!(woken[0].state, ProcessState::Ready);

        let woken = q.tick();
        assert_eq!(woken[0].pid, Pid::new(3));
        assert!(q.is_empty());
    }

    #[test]
    fn zero_wait_wakes_on_first_tick() {
        let mut q = BlockedQueue::new();
        q.add(blocked(1, 0));
        assert_eq!(q.tick().len(), 1);
    }
}
