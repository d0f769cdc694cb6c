// src/harness/runner.rs
use std::{
    fmt::Write as _,
    path::Path,
    process::{Command, Stdio},
    time::Instant,
};

use rayon::prelude::*;

use super::{Case, ExitExpectation, Program, ansi::normalize_output};
use crate::config::HarnessConfig;

const RED: &str = "\x1B[31m";
const GREEN: &str = "\x1B[32m";
const NORMAL: &str = "\x1B[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitMismatch {
    pub expected: ExitExpectation,
    /// `None` when the process was killed by a signal.
    pub actual: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseFailure {
    /// The program could not be started at all.
    Spawn { command: String, error: String },
    Run {
        command: String,
        output: Vec<u8>,
        predicate_failed: bool,
        exit: Option<ExitMismatch>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Skipped,
    Failed(CaseFailure),
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub outcome: CaseOutcome,
}

/// Per-case outcomes in declaration order.
#[derive(Debug, Clone, Default)]
pub struct HarnessReport {
    pub cases: Vec<CaseReport>,
}

impl HarnessReport {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Passed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Failed(_)))
    }

    fn count(&self, f: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases.iter().filter(|c| f(&c.outcome)).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status for the whole run.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() { 0 } else { 1 }
    }

    /// Human-readable report, one block per case plus a summary line.
    pub fn render(&self, color: bool) -> String {
        let (red, green, normal) = if color {
            (RED, GREEN, NORMAL)
        } else {
            ("", "", "")
        };
        let mut s = String::new();
        for c in &self.cases {
            match &c.outcome {
                CaseOutcome::Passed => {
                    let _ = writeln!(s, "Running test `{}`", c.name);
                }
                CaseOutcome::Skipped => {
                    let _ = writeln!(s, "Skipped test `{}` (not applicable)", c.name);
                }
                CaseOutcome::Failed(CaseFailure::Spawn { command, error }) => {
                    let _ = writeln!(s, "Running test `{}`", c.name);
                    let _ = writeln!(
                        s,
                        "{red}TEST `{}` FAILED: could not run {command}: {error}{normal}",
                        c.name
                    );
                }
                CaseOutcome::Failed(CaseFailure::Run {
                    command,
                    output,
                    predicate_failed,
                    exit,
                }) => {
                    let _ = writeln!(s, "Running test `{}`", c.name);
                    if *predicate_failed {
                        let _ = writeln!(
                            s,
                            "{red}TEST `{}` FAILED: Output from command {command} does not meet predicate.{normal}",
                            c.name
                        );
                    }
                    if let Some(m) = exit {
                        let actual = m.actual.map_or("signal".to_string(), |c| c.to_string());
                        let _ = writeln!(
                            s,
                            "{red}TEST `{}` FAILED: exit status {actual}, expected {}{normal}",
                            c.name, m.expected
                        );
                    }
                    let _ = writeln!(s, "{red}Actual...{normal}");
                    let _ = writeln!(s, "{}", String::from_utf8_lossy(output));
                }
            }
        }
        if self.all_passed() {
            let _ = writeln!(
                s,
                "{green}All tests passed ({} run, {} skipped)...{normal}",
                self.passed(),
                self.skipped()
            );
        } else {
            let _ = writeln!(
                s,
                "{red}{} of {} tests failed, exiting with status of 1...{normal}",
                self.failed(),
                self.cases.len() - self.skipped()
            );
        }
        s
    }
}

/// Runs every case. Failures never stop the run.
pub fn run(cases: &[Case], executable: &Path, config: &HarnessConfig) -> HarnessReport {
    let instant = Instant::now();
    let reports: Vec<CaseReport> = if config.parallel {
        cases.par_iter().map(|c| run_case(c, executable)).collect()
    } else {
        cases.iter().map(|c| run_case(c, executable)).collect()
    };
    let report = HarnessReport { cases: reports };
    log::info!(
        "[conform] {} passed, {} failed, {} skipped in {} ms",
        report.passed(),
        report.failed(),
        report.skipped(),
        instant.elapsed().as_millis()
    );
    report
}

fn run_case(case: &Case, executable: &Path) -> CaseReport {
    let outcome = if case.applies_here() {
        execute(case, executable)
    } else {
        log::warn!("[conform] skipped `{}` (only on {:?})", case.name, case.only_on);
        CaseOutcome::Skipped
    };
    CaseReport {
        name: case.name.clone(),
        outcome,
    }
}

fn execute(case: &Case, executable: &Path) -> CaseOutcome {
    let program = match &case.program {
        Program::UnderTest => executable,
        Program::Path(p) => p.as_path(),
    };
    let argv: Vec<String> = std::iter::once(program.display().to_string())
        .chain(case.args.iter().cloned())
        .collect();
    let command = format!("{argv:?}");
    log::debug!("[conform] running `{}`: {command}", case.name);

    let out = match Command::new(program)
        .args(&case.args)
        .stdin(Stdio::null())
        .output()
    {
        Ok(out) => out,
        Err(e) => {
            return CaseOutcome::Failed(CaseFailure::Spawn {
                command,
                error: e.to_string(),
            });
        }
    };

    let output = normalize_output(&out.stdout, &out.stderr);
    let predicate_failed = !case.check.accepts(&output);
    let code = out.status.code();
    let exit = (!case.exit.accepts(code)).then_some(ExitMismatch {
        expected: case.exit,
        actual: code,
    });

    if predicate_failed || exit.is_some() {
        CaseOutcome::Failed(CaseFailure::Run {
            command,
            output,
            predicate_failed,
            exit,
        })
    } else {
        CaseOutcome::Passed
    }
}
