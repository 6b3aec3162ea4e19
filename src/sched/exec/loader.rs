//! Carga de processos a partir de arquivos de programa
//!
//! Cada arquivo contém:
//! - Primeira linha: nome do processo.
//! - Linhas seguintes: instruções (`A=10`, `COM`, `E/S`, `SAIDA`...).

use std::fs;
use std::path::{Path, PathBuf};

use super::instruction::Instruction;
use crate::core::trace::{Event, EventSink};
use crate::sched::task::ProcessControlBlock;
use crate::sys::types::Pid;
use crate::sys::{Result, SchedError};

/// Programa decodificado, ainda sem PID
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

/// Decodifica o texto completo de um programa
pub fn parse_program(text: &str) -> Result<Program> {
    let mut lines = text.lines();

    let name = lines.next().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(SchedError::EmptyProgram {
            path: PathBuf::new(),
        });
    }

    let mut instructions = Vec::new();
    // Linha 1 é o nome; instruções começam na linha 2
    for (idx, line) in lines.enumerate() {
        if let Some(instr) = Instruction::parse(line, idx + 2)? {
            instructions.push(instr);
        }
    }

    Ok(Program {
        name: name.to_string(),
        instructions,
    })
}

/// Carregador de processos
///
/// Atribui PIDs sequenciais (a partir de 1) somente aos programas carregados
/// com sucesso.
#[derive(Debug)]
pub struct ProgramLoader {
    next_pid: Pid,
}

impl Default for ProgramLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramLoader {
    pub const fn new() -> Self {
        Self {
            next_pid: Pid::FIRST,
        }
    }

    /// Cria o PCB de um programa já decodificado
    pub fn spawn(&mut self, program: Program) -> ProcessControlBlock {
        let pid = self.next_pid;
        self.next_pid = pid.next();
        log::debug!(
            "(Loader) PID {} = {} ({} instruções)",
            pid,
            program.name,
            program.instructions.len()
        );
        ProcessControlBlock::new(pid, program.name, program.instructions)
    }

    /// Carrega um único arquivo de programa
    pub fn load_file(&mut self, path: &Path) -> Result<ProcessControlBlock> {
        let text = fs::read_to_string(path).map_err(|e| SchedError::io(path, e))?;
        let program = parse_program(&text).map_err(|e| e.in_file(path))?;
        Ok(self.spawn(program))
    }

    /// Carrega todos os `.txt` de `dir`, em ordem alfabética (sem diferenciar
    /// maiúsculas).
    ///
    /// Arquivos inválidos são ignorados; o erro vai para o console e para o
    /// trace. Falha apenas se o diretório não puder ser lido ou não tiver
    /// nenhum `.txt`.
    pub fn load_dir<S: EventSink>(
        &mut self,
        dir: &Path,
        sink: &mut S,
    ) -> Result<Vec<ProcessControlBlock>> {
        let files = program_files(dir)?;
        if files.is_empty() {
            return Err(SchedError::NoPrograms {
                dir: dir.to_path_buf(),
            });
        }

        let mut processes = Vec::with_capacity(files.len());
        for path in files {
            match self.load_file(&path) {
                Ok(pcb) => processes.push(pcb),
                Err(e) => {
                    let message = format!(
                        "Erro ao carregar o processo do arquivo {}: {}",
                        path.display(),
                        e
                    );
                    log::error!("(Loader) {message}");
                    sink.record(&Event::Error { message: &message });
                }
            }
        }

        log::info!(
            "(Loader) {} processo(s) carregado(s) de {}",
            processes.len(),
            dir.display()
        );
        Ok(processes)
    }
}

/// Lista os arquivos `.txt` de `dir`, ordenados por nome sem diferenciar
/// maiúsculas
pub fn program_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SchedError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SchedError::io(dir, e))?.path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trace::MemoryTrace;
    use crate::sched::exec::instruction::Register;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn parse_program_reads_name_and_instructions() {
        let program = parse_program("TESTE-1\nA=1\n\nCOM\nE/S\nSAIDA\n").unwrap();
        assert_eq!(program.name, "TESTE-1");
        assert_eq!(
            program.instructions,
            vec![
                Instruction::Assign(Register::A, 1),
                Instruction::Com,
                Instruction::Io,
                Instruction::Exit,
            ]
        );
    }

    #[test]
    fn parse_program_line_numbers_count_name_line() {
        let err = parse_program("P\nCOM\nPULA\n").unwrap_err();
        assert!(matches!(err, SchedError::UnknownInstruction { line: 3, .. }));
    }

    #[test]
    fn parse_program_requires_name() {
        assert!(matches!(
            parse_program(""),
            Err(SchedError::EmptyProgram { .. })
        ));
        assert!(matches!(
            parse_program("   \nCOM\n"),
            Err(SchedError::EmptyProgram { .. })
        ));
    }

    #[test]
    fn name_only_program_is_valid() {
        let program = parse_program("VAZIO").unwrap();
        assert!(program.instructions.is_empty());
    }

    #[test]
    fn load_dir_sorts_case_insensitively_and_assigns_pids() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "prog_02.txt", "DOIS\nCOM\n");
        write(dir.path(), "PROG_01.TXT", "UM\nCOM\n");
        write(dir.path(), "prog_03.txt", "TRES\nSAIDA\n");
        write(dir.path(), "notas.md", "ignorado\n");

        let mut trace = MemoryTrace::new();
        let procs = ProgramLoader::new()
            .load_dir(dir.path(), &mut trace)
            .unwrap();

        let names: Vec<_> = procs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["UM", "DOIS", "TRES"]);
        let pids: Vec<_> = procs.iter().map(|p| p.pid.as_u32()).collect();
        assert_eq!(pids, [1, 2, 3]);
        assert!(trace.lines().is_empty());
    }

    #[test]
    fn load_dir_skips_bad_files_without_consuming_pid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "A\nCOM\n");
        write(dir.path(), "b.txt", "");
        write(dir.path(), "c.txt", "C\nNOP\n");
        write(dir.path(), "d.txt", "D\nE/S\n");

        let mut trace = MemoryTrace::new();
        let procs = ProgramLoader::new()
            .load_dir(dir.path(), &mut trace)
            .unwrap();

        assert_eq!(procs.len(), 2);
        assert_eq!(procs[1].name, "D");
        assert_eq!(procs[1].pid, Pid::new(2));

        assert_eq!(trace.lines().len(), 2);
        assert!(trace.lines()[0].starts_with("[ERRO] Erro ao carregar o processo do arquivo"));
        assert!(trace.lines()[0].contains("não contém nome de processo"));
        assert!(trace.lines()[1].contains("instrução desconhecida na linha 2"));
    }

    #[test]
    fn load_dir_without_programs_fails() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "leia.md", "x");
        let err = ProgramLoader::new()
            .load_dir(dir.path(), &mut MemoryTrace::new())
            .unwrap_err();
        assert!(matches!(err, SchedError::NoPrograms { .. }));

        let err = ProgramLoader::new()
            .load_dir(&dir.path().join("nao-existe"), &mut MemoryTrace::new())
            .unwrap_err();
        assert!(matches!(err, SchedError::Io { .. }));
    }
}
