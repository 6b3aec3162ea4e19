//! Testes de ponta a ponta: diretório de programas -> trace -> estatísticas

use std::fs;
use std::path::Path;

use escalonador::core::trace::TraceEvents;
use escalonador::sched::ProcessState;
use escalonador::{simulate, sweep, SchedConfig, SchedError, TraceOutput};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn programs() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "prog_01.txt", "TESTE-1\nA=1\nCOM\nE/S\nB=2\nSAIDA\n");
    write(dir.path(), "prog_02.txt", "TESTE-2\nC=3\nD=4\nCOM\n");
    dir
}

fn config(programs: &Path, logs: &Path, quantum: u32) -> SchedConfig {
    let mut cfg = SchedConfig::new(quantum);
    cfg.programs_dir = programs.to_path_buf();
    cfg.logs_dir = logs.to_path_buf();
    cfg
}

#[test]
fn full_run_writes_expected_log() {
    let progs = programs();
    let logs = tempfile::tempdir().unwrap();
    let report = simulate(&config(progs.path(), &logs.path().join("logs"), 2)).unwrap();

    let TraceOutput::File(path) = &report.trace else {
        panic!("esperava trace em arquivo");
    };
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("log02_"));

    let content = fs::read_to_string(path).unwrap();
    let expected = "\
Carregando TESTE-1
Carregando TESTE-2
Executando TESTE-1
Interrompendo TESTE-1 após 2 instruções
Executando TESTE-2
Interrompendo TESTE-2 após 2 instruções
Executando TESTE-1
Interrompendo TESTE-1 após 0 instruções
E/S iniciada em TESTE-1
Executando TESTE-2
TESTE-2 terminado. A=0. B=0. C=3. D=4
Executando TESTE-1
TESTE-1 terminado. A=1. B=2. C=0. D=0
MÉDIA DE TROCAS: 2.50
MÉDIA DE INSTRUÇÕES: 1.40
QUANTUM: 2
";
    assert_eq!(content, expected);

    assert_eq!(report.statistics.processes, 2);
    assert!(report
        .terminated
        .iter()
        .all(|p| p.state == ProcessState::Terminated));
}

#[test]
fn dry_run_keeps_trace_in_memory() {
    let progs = programs();
    let logs = tempfile::tempdir().unwrap();
    let logs_dir = logs.path().join("nunca-criado");
    let mut cfg = config(progs.path(), &logs_dir, 5);
    cfg.dry_run = true;
    cfg.trace_filter = TraceEvents::SUMMARY;

    let report = simulate(&cfg).unwrap();
    assert!(!logs_dir.exists());

    let TraceOutput::Memory(lines) = report.trace else {
        panic!("esperava trace em memória");
    };
    // Quantum 5: TESTE-1 bloqueia na 1a fatia, TESTE-2 termina na 1a fatia
    assert_eq!(
        lines,
        [
            "TESTE-2 terminado. A=0. B=0. C=3. D=4",
            "TESTE-1 terminado. A=1. B=2. C=0. D=0",
            "MÉDIA DE TROCAS: 1.50",
            "MÉDIA DE INSTRUÇÕES: 2.33",
            "QUANTUM: 5",
        ]
    );
}

#[test]
fn invalid_program_is_logged_and_skipped() {
    let progs = programs();
    write(progs.path(), "prog_00.txt", "QUEBRADO\nA=um\n");
    let logs = tempfile::tempdir().unwrap();
    let mut cfg = config(progs.path(), logs.path(), 2);
    cfg.dry_run = true;

    let report = simulate(&cfg).unwrap();
    let TraceOutput::Memory(lines) = report.trace else {
        panic!("esperava trace em memória");
    };
    assert!(lines[0].starts_with("[ERRO] "));
    assert!(lines[0].contains("valor inválido na linha 2"));
    assert_eq!(lines[1], "Carregando TESTE-1");
    // PIDs continuam começando em 1
    assert_eq!(report.terminated.iter().map(|p| p.pid.as_u32()).max(), Some(2));
}

#[test]
fn empty_programs_dir_fails() {
    let progs = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    let mut cfg = config(progs.path(), logs.path(), 2);
    cfg.dry_run = true;
    assert!(matches!(simulate(&cfg), Err(SchedError::NoPrograms { .. })));
}

#[test]
fn sweep_writes_one_log_per_quantum() {
    let progs = programs();
    let logs = tempfile::tempdir().unwrap();
    let reports = sweep(&config(progs.path(), logs.path(), 1), 3).unwrap();

    let quanta: Vec<_> = reports.iter().map(|r| r.statistics.quantum).collect();
    assert_eq!(quanta, [1, 2, 3]);

    let mut names: Vec<_> = fs::read_dir(logs.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("log01_"));
    assert!(names[2].starts_with("log03_"));

    // Quantum maior nunca aumenta a média de trocas neste conjunto
    let switches: Vec<_> = reports
        .iter()
        .map(|r| r.statistics.average_switches())
        .collect();
    assert!(switches.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn zero_quantum_config_is_rejected() {
    let progs = programs();
    let logs = tempfile::tempdir().unwrap();
    let err = simulate(&config(progs.path(), logs.path(), 0)).unwrap_err();
    assert!(matches!(err, SchedError::QuantumOutOfRange { value: 0 }));
}

#[test]
fn sweep_below_minimum_quantum_fails() {
    let progs = programs();
    let logs = tempfile::tempdir().unwrap();
    let err = sweep(&config(progs.path(), logs.path(), 1), 0).unwrap_err();
    assert!(matches!(err, SchedError::QuantumOutOfRange { value: 0 }));

    // Nenhuma execução chegou a abrir trace
    assert_eq!(fs::read_dir(logs.path()).unwrap().count(), 0);
}
