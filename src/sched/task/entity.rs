//! Process Control Block

use super::accounting::Accounting;
use super::state::ProcessState;
use crate::sched::exec::instruction::{Instruction, Register};
use crate::sys::types::Pid;

/// Registradores de propósito geral
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}

impl Registers {
    pub fn get(&self, reg: Register) -> i32 {
        match reg {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
        }
    }

    pub fn set(&mut self, reg: Register, value: i32) {
        match reg {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
        }
    }
}

/// Resultado de um passo de execução
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Instrução executada normalmente (conta para o quantum)
    Continue,
    /// Instrução de E/S: o processo deve bloquear
    Io,
}

/// Process Control Block (BCP)
#[derive(Debug, Clone)]
pub struct ProcessControlBlock {
    /// ID único
    pub pid: Pid,
    /// Nome (primeira linha do arquivo)
    pub name: String,
    /// Estado atual
    pub state: ProcessState,
    /// Índice da próxima instrução em `program`
    pub pc: usize,
    pub registers: Registers,
    /// Programa decodificado
    pub program: Vec<Instruction>,
    /// Ticks restantes bloqueado em E/S
    pub wait_time: u32,
    /// Estatísticas de contabilidade
    pub accounting: Accounting,
}

impl ProcessControlBlock {
    pub fn new(pid: Pid, name: impl Into<String>, program: Vec<Instruction>) -> Self {
        Self {
            pid,
            name: name.into(),
            state: ProcessState::Ready,
            pc: 0,
            registers: Registers::default(),
            program,
            wait_time: 0,
            accounting: Accounting::new(),
        }
    }

    /// Programa chegou ao fim (SAIDA ou última instrução)
    pub fn is_finished(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Próxima instrução a executar
    pub fn current_instruction(&self) -> Option<Instruction> {
        self.program.get(self.pc).copied()
    }

    /// Executa a instrução apontada pelo PC e avança o PC.
    ///
    /// Chamar com o programa terminado é um no-op que retorna `Continue`.
    pub fn step(&mut self) -> StepOutcome {
        let Some(instr) = self.current_instruction() else {
            return StepOutcome::Continue;
        };
        log::trace!("(Task) PID {} pc={} {}", self.pid, self.pc, instr);

        match instr {
            Instruction::Assign(reg, value) => {
                self.registers.set(reg, value);
                self.pc += 1;
            }
            Instruction::Com => self.pc += 1,
            Instruction::Exit => self.pc = self.program.len(),
            Instruction::Io => {
                self.pc += 1;
                self.accounting.account_io();
                return StepOutcome::Io;
            }
        }
        StepOutcome::Continue
    }

    /// Marca como pronto
    pub fn set_ready(&mut self) {
        self.state = ProcessState::Ready;
    }

    /// Marca como bloqueado por `wait` ticks
    pub fn set_blocked(&mut self, wait: u32) {
        self.state = ProcessState::Blocked;
        self.wait_time = wait;
    }
}
