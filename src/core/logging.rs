// =============================================================================
// LOGGING DE CONSOLE - ZERO OVERHEAD
// =============================================================================
//
// Logs de diagnóstico do simulador (stderr). NÃO confundir com o trace de
// eventos do escalonador (core::trace), que é a saída da simulação.
//
// ARQUITETURA:
// - Os módulos usam a fachada `log` (log::info!, log::debug!...).
// - As features do Cargo (no_logs, log_error, log_info, log_debug, log_trace)
//   ativam `log/max_level_*`: níveis acima do máximo somem em compile-time.
// - Em runtime, `init` define o nível efetivo (flag -v do CLI).
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Configuração ou carga impossível
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal (início/fim de execução, arquivos gerados)
// - DEBUG: Bloqueios, despertares, PIDs atribuídos
// - TRACE: Cada instrução executada
//
// CONVENÇÃO DE MENSAGEM:
//   log::info!("(Sched) Iniciando...");   // Prefixo com o subsistema
//
// =============================================================================

use std::io::{IsTerminal, Write};

use log::{LevelFilter, Log, Metadata, Record};

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================
//
// Formato: \x1b[<código>m  onde:
//   1;31 = Bold Red
//   1;33 = Bold Yellow
//   32   = Green
//   36   = Cyan
//   35   = Magenta
//   0    = Reset
//

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// Prefixo colorido de um nível
pub const fn prefix(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => P_ERROR,
        log::Level::Warn => P_WARN,
        log::Level::Info => P_INFO,
        log::Level::Debug => P_DEBUG,
        log::Level::Trace => P_TRACE,
    }
}

/// Prefixo sem escapes ANSI (saída redirecionada para arquivo ou pipe)
pub const fn plain_prefix(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "[ERRO] ",
        log::Level::Warn => "[WARN] ",
        log::Level::Info => "[INFO] ",
        log::Level::Debug => "[DEBG] ",
        log::Level::Trace => "[TRAC] ",
    }
}

/// Backend de console
///
/// O Mutex serializa as linhas: um registro nunca é intercalado com outro.
pub struct ConsoleLogger {
    level: LevelFilter,
    colored: bool,
    out: spin::Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, colored: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            colored,
            out: spin::Mutex::new(out),
        }
    }

    /// Cores somente quando stderr é um terminal
    pub fn stderr(level: LevelFilter) -> Self {
        let stderr = std::io::stderr();
        Self::new(level, stderr.is_terminal(), Box::new(stderr))
    }

    fn prefix(&self, level: log::Level) -> &'static str {
        if self.colored {
            prefix(level)
        } else {
            plain_prefix(level)
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut out = self.out.lock();
        // Falha ao escrever no console não tem para onde ser reportada
        let _ = writeln!(out, "{}{}", self.prefix(record.level()), record.args());
    }

    fn flush(&self) {
        let _ = self.out.lock().flush();
    }
}

static LOGGER: spin::Once<ConsoleLogger> = spin::Once::new();

/// Instala o logger de console (somente a primeira chamada tem efeito)
pub fn init(level: LevelFilter) {
    let logger = LOGGER.call_once(|| ConsoleLogger::stderr(level));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// Nível de console a partir do número de `-v`
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
