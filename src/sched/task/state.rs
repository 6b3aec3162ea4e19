//! Estados de processo

/// Estado de um processo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    /// Pronto para executar, aguardando CPU
    #[default]
    Ready,
    /// Executando no momento
    Running,
    /// Bloqueado aguardando o tempo de E/S se esgotar
    Blocked,
    /// Finalizou (SAIDA ou fim do programa)
    Terminated,
}

impl ProcessState {
    /// Verifica se pode ser escalonado
    pub const fn is_runnable(self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }
}
