//! Contabilidade de Recursos (Accounting)
//!
//! Rastreia o consumo de CPU de cada processo: fatias recebidas, instruções
//! executadas e interrupções. Alimenta as estatísticas finais.

/// Estatísticas de uso de recursos de um processo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accounting {
    /// Vezes em que o processo recebeu a CPU
    pub dispatches: u64,

    /// Instruções executadas (E/S não conta)
    pub instructions: u64,

    /// Fatias encerradas: preempção, bloqueio por E/S ou término
    pub interruptions: u64,

    /// Instruções E/S executadas
    pub io_requests: u64,
}

impl Accounting {
    /// Cria uma nova estrutura de contabilidade zerada
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o início de uma fatia (processo ganhou a CPU)
    pub fn start_slice(&mut self) {
        self.dispatches += 1;
    }

    /// Registra o fim de uma fatia com `executed` instruções
    pub fn end_slice(&mut self, executed: u32) {
        self.instructions += u64::from(executed);
        self.interruptions += 1;
    }

    pub fn account_io(&mut self) {
        self.io_requests += 1;
    }
}
