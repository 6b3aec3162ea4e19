//! Escalonador — Binário Principal.
//!
//! Passo a passo:
//! 1. Lê o quantum (`--quantum` ou arquivo de quantum).
//! 2. Abre o trace (`logNN_<millis>.txt` no diretório de logs).
//! 3. Carrega os programas `.txt` em ordem alfabética.
//! 4. Executa o escalonador Round-Robin.
//! 5. Grava as estatísticas finais e fecha o trace.
//!
//! Com `--sweep N` os passos 2-5 repetem para cada quantum de 1 a N.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use escalonador::core::logging;
use escalonador::core::trace::TraceEvents;
use escalonador::sched::config::{
    self, DEFAULT_LOGS_DIR, DEFAULT_PROGRAMS_DIR, DEFAULT_QUANTUM_FILE, IO_WAIT_FACTOR,
};
use escalonador::{Report, SchedConfig, TraceOutput};

#[derive(Parser)]
#[command(name = "escalonador")]
#[command(about = "Simulador de escalonamento Round-Robin", long_about = None)]
struct Cli {
    /// Quantum (instruções por fatia); ignora o arquivo de quantum
    #[arg(short, long)]
    quantum: Option<u32>,

    /// Arquivo com o valor do quantum
    #[arg(long, default_value = DEFAULT_QUANTUM_FILE)]
    quantum_file: PathBuf,

    /// Diretório dos programas (.txt)
    #[arg(short, long, default_value = DEFAULT_PROGRAMS_DIR)]
    programs: PathBuf,

    /// Diretório dos arquivos de log
    #[arg(short, long, default_value = DEFAULT_LOGS_DIR)]
    logs: PathBuf,

    /// Espera de E/S = fator * quantum
    #[arg(long, default_value_t = IO_WAIT_FACTOR)]
    io_wait_factor: u32,

    /// Executa para cada quantum de 1 até MAX
    #[arg(long, value_name = "MAX")]
    sweep: Option<u32>,

    /// Grava apenas términos, estatísticas e erros no log
    #[arg(long)]
    summary_only: bool,

    /// Não cria arquivo de log; imprime o trace na saída padrão
    #[arg(long)]
    dry_run: bool,

    /// Aumenta o detalhamento do console (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> escalonador::Result<SchedConfig> {
        let quantum = match self.quantum {
            Some(q) => q,
            None if self.sweep.is_some() => config::QUANTUM_MIN,
            None => config::load_quantum(&self.quantum_file)?,
        };

        let mut cfg = SchedConfig::new(quantum);
        cfg.io_wait_factor = self.io_wait_factor;
        cfg.programs_dir = self.programs.clone();
        cfg.logs_dir = self.logs.clone();
        cfg.dry_run = self.dry_run;
        if self.summary_only {
            cfg.trace_filter = TraceEvents::SUMMARY;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_from_verbosity(cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> escalonador::Result<()> {
    let cfg = cli.config()?;

    let reports = match cli.sweep {
        Some(max) => escalonador::sweep(&cfg, max)?,
        None => vec![escalonador::simulate(&cfg)?],
    };

    for report in &reports {
        print_report(report);
    }
    if reports.len() > 1 {
        print_sweep_table(&reports);
    }
    Ok(())
}

fn print_report(report: &Report) {
    match &report.trace {
        TraceOutput::File(path) => println!("Log gerado: {}", path.display()),
        TraceOutput::Memory(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
    }
}

fn print_sweep_table(reports: &[Report]) {
    println!("QUANTUM | MÉDIA DE TROCAS | MÉDIA DE INSTRUÇÕES");
    for report in reports {
        let stats = &report.statistics;
        println!(
            "{:>7} | {:>15.2} | {:>19.2}",
            stats.quantum,
            stats.average_switches(),
            stats.average_instructions()
        );
    }
}
