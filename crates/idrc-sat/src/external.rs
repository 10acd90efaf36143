//! External-process backend: shells out to a named solver binary on the
//! system `PATH`, speaking plain DIMACS (§6: "A DIMACS serializer must
//! exist for integration with external solver binaries").

use std::io::Write;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, instrument, warn};

use idrc_cnf::CnfBuilder;

use crate::backend::SatBackend;
use crate::error::{SatError, SatResult};
use crate::outcome::SatOutcome;

/// A [`SatBackend`] that writes a DIMACS file, spawns a named solver binary
/// against it, and parses the solver's own DIMACS-ish solution output
/// (the `s SATISFIABLE` / `s UNSATISFIABLE` / `v ...` line convention most
/// SAT Competition binaries, including minisat, glucose, and cadical,
/// share).
#[derive(Debug, Clone)]
pub struct ExternalProcessBackend {
    binary: String,
    extra_args: Vec<String>,
}

impl ExternalProcessBackend {
    /// Drive the named binary with no extra arguments.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Drive the named binary, passing `extra_args` before the instance
    /// file path.
    pub fn with_args(binary: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args,
        }
    }
}

impl SatBackend for ExternalProcessBackend {
    #[instrument(skip(self, cnf), fields(backend = %self.binary, vars = cnf.num_vars(), clauses = cnf.num_clauses()))]
    fn solve(&self, cnf: &CnfBuilder) -> SatResult<SatOutcome> {
        let path = scratch_path(&self.binary);
        debug!(path = %path.display(), "writing DIMACS instance");
        let mut file = std::fs::File::create(&path)?;
        file.write_all(cnf.to_dimacs().as_bytes())?;
        drop(file);

        let mut command = Command::new(&self.binary);
        command.args(&self.extra_args).arg(&path);

        let output = command.output().map_err(|e| SatError::ExternalSolverFailure {
            backend: self.binary.clone(),
            message: format!("failed to spawn: {e}"),
        })?;
        let _ = std::fs::remove_file(&path);

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_solution(&self.binary, &stdout)
    }

    fn name(&self) -> &str {
        &self.binary
    }
}

fn scratch_path(binary: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("idrc-{binary}-{}-{nanos}.cnf", std::process::id()))
}

/// Parse a SAT Competition-style solution stream: a `s SATISFIABLE` or
/// `s UNSATISFIABLE` status line, followed (when satisfiable) by one or
/// more `v <lit> <lit> ... 0` lines listing every variable's signed
/// assignment.
fn parse_solution(backend: &str, stdout: &str) -> SatResult<SatOutcome> {
    let mut satisfiable = None;
    let mut literals = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if let Some(status) = line.strip_prefix("s ") {
            match status.trim() {
                "SATISFIABLE" => satisfiable = Some(true),
                "UNSATISFIABLE" => satisfiable = Some(false),
                "UNKNOWN" => {
                    return Err(SatError::ExternalSolverFailure {
                        backend: backend.to_string(),
                        message: "solver returned UNKNOWN".to_string(),
                    })
                }
                other => warn!(status = other, "unrecognized solver status line"),
            }
        } else if let Some(rest) = line.strip_prefix("v ") {
            for tok in rest.split_whitespace() {
                match tok.parse::<i32>() {
                    Ok(0) => {}
                    Ok(lit) => literals.push(lit),
                    Err(_) => {}
                }
            }
        }
    }

    match satisfiable {
        Some(false) => Ok(SatOutcome::Unsatisfiable),
        Some(true) => {
            let num_vars = literals.iter().map(|l| l.unsigned_abs()).max().unwrap_or(0) as usize;
            let mut model = vec![false; num_vars];
            for lit in literals {
                if lit > 0 {
                    model[(lit - 1) as usize] = true;
                }
            }
            Ok(SatOutcome::Satisfiable { model })
        }
        None => Err(SatError::ExternalSolverFailure {
            backend: backend.to_string(),
            message: "no status line found in solver output".to_string(),
        }),
    }
}
