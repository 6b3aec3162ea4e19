//! # Erros do Simulador
//!
//! Define os erros retornados pelo loader, pela configuração e pelo trace.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Uniformidade:** Toda operação falível do crate retorna [`Result`].
//! - **Diagnóstico:** Erros de programa carregam o número da linha (base 1) para
//!   que o autor do arquivo encontre a instrução inválida sem adivinhar.
//!
//! Erros de escrita no arquivo de trace NÃO aparecem aqui: eles são registrados
//! no console e a simulação continua.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Erro do simulador
#[derive(Debug, Error)]
pub enum SchedError {
    /// Falha de IO ao acessar um arquivo ou diretório
    #[error("erro de IO em {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Conteúdo do arquivo de quantum não é um inteiro
    #[error("quantum inválido: {text:?}")]
    InvalidQuantum { text: String },

    /// Quantum fora do intervalo aceito (>= 1)
    #[error("quantum fora do intervalo: {value} (mínimo {})", crate::sched::config::QUANTUM_MIN)]
    QuantumOutOfRange { value: i64 },

    /// Arquivo de programa sem nome de processo
    #[error("arquivo {} não contém nome de processo", .path.display())]
    EmptyProgram { path: PathBuf },

    /// Linha que não corresponde a nenhuma instrução conhecida
    #[error("instrução desconhecida na linha {line}: {text:?}")]
    UnknownInstruction { line: usize, text: String },

    /// Atribuição de registrador com valor não inteiro
    #[error("valor inválido na linha {line}: {text:?}")]
    InvalidValue { line: usize, text: String },

    /// Diretório de programas sem nenhum .txt
    #[error("nenhum arquivo .txt encontrado em {}", .dir.display())]
    NoPrograms { dir: PathBuf },
}

impl SchedError {
    /// Atalho para embrulhar um `io::Error` com o caminho envolvido
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Anexa o caminho do arquivo a um erro de parsing
    ///
    /// Erros de parsing são gerados sem conhecer o arquivo; o loader usa isto
    /// para produzir mensagens completas no log.
    pub fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            Self::EmptyProgram { .. } => Self::EmptyProgram {
                path: path.to_path_buf(),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedError>;
