// src/harness/mod.rs
// End-to-end conformance harness: run a program with arguments, check its
// normalised output and exit status, report every case.

pub mod ansi;
pub mod manifest;
pub mod runner;

use std::{fmt, path::PathBuf, sync::Arc};

use regex::bytes::Regex;
use serde::Deserialize;

pub use ansi::normalize_output;
pub use manifest::{load_manifest, resolve_executable};
pub use runner::{CaseFailure, CaseOutcome, CaseReport, ExitMismatch, HarnessReport, run};

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {source}", path.display())]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("executable '{name}' not found")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: Option<which::Error>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Expected process exit. A process killed by a signal has no code and only
/// satisfies `NonZero`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "ExitDisk")]
pub enum ExitExpectation {
    #[default]
    Zero,
    NonZero,
    Code(i32),
}

impl ExitExpectation {
    pub fn accepts(self, code: Option<i32>) -> bool {
        match self {
            ExitExpectation::Zero => code == Some(0),
            ExitExpectation::NonZero => code != Some(0),
            ExitExpectation::Code(want) => code == Some(want),
        }
    }
}

impl fmt::Display for ExitExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitExpectation::Zero => f.write_str("zero"),
            ExitExpectation::NonZero => f.write_str("non-zero"),
            ExitExpectation::Code(c) => write!(f, "{c}"),
        }
    }
}

// "zero" | "non-zero" | <integer>
#[derive(Deserialize)]
#[serde(untagged)]
enum ExitDisk {
    Code(i32),
    Named(ExitName),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ExitName {
    Zero,
    NonZero,
}

impl From<ExitDisk> for ExitExpectation {
    fn from(d: ExitDisk) -> Self {
        match d {
            ExitDisk::Code(c) => ExitExpectation::Code(c),
            ExitDisk::Named(ExitName::Zero) => ExitExpectation::Zero,
            ExitDisk::Named(ExitName::NonZero) => ExitExpectation::NonZero,
        }
    }
}

pub type Predicate = Arc<dyn Fn(&[u8]) -> bool + Send + Sync>;

/// Check applied to the normalised output.
#[derive(Clone)]
pub enum OutputCheck {
    /// Only the exit status matters ("compiles").
    Any,
    Contains(Vec<u8>),
    NotContains(Vec<u8>),
    Matches(Regex),
    Custom(Predicate),
}

impl OutputCheck {
    pub fn contains(needle: impl Into<Vec<u8>>) -> Self {
        OutputCheck::Contains(needle.into())
    }

    pub fn custom(f: impl Fn(&[u8]) -> bool + Send + Sync + 'static) -> Self {
        OutputCheck::Custom(Arc::new(f))
    }

    pub fn accepts(&self, output: &[u8]) -> bool {
        match self {
            OutputCheck::Any => true,
            OutputCheck::Contains(needle) => contains(output, needle),
            OutputCheck::NotContains(needle) => !contains(output, needle),
            OutputCheck::Matches(re) => re.is_match(output),
            OutputCheck::Custom(f) => f(output),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

impl fmt::Debug for OutputCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCheck::Any => f.write_str("Any"),
            OutputCheck::Contains(n) => write!(f, "Contains({:?})", String::from_utf8_lossy(n)),
            OutputCheck::NotContains(n) => {
                write!(f, "NotContains({:?})", String::from_utf8_lossy(n))
            }
            OutputCheck::Matches(re) => write!(f, "Matches({:?})", re.as_str()),
            OutputCheck::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Which program a case runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// The executable under test.
    UnderTest,
    /// Anything else, typically a binary the compiler produced in an earlier case.
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub program: Program,
    pub args: Vec<String>,
    pub check: OutputCheck,
    pub exit: ExitExpectation,
    pub only_on: Option<Platform>,
}

impl Case {
    /// Runs the executable under test; expects exit zero and accepts any output.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            program: Program::UnderTest,
            args: args.into_iter().map(Into::into).collect(),
            check: OutputCheck::Any,
            exit: ExitExpectation::Zero,
            only_on: None,
        }
    }

    pub fn program(mut self, path: impl Into<PathBuf>) -> Self {
        self.program = Program::Path(path.into());
        self
    }

    pub fn check(mut self, check: OutputCheck) -> Self {
        self.check = check;
        self
    }

    pub fn exit(mut self, exit: ExitExpectation) -> Self {
        self.exit = exit;
        self
    }

    pub fn only_on(mut self, platform: Platform) -> Self {
        self.only_on = Some(platform);
        self
    }

    pub fn applies_here(&self) -> bool {
        self.only_on.is_none_or(|p| p == Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_expectations() {
        assert!(ExitExpectation::Zero.accepts(Some(0)));
        assert!(!ExitExpectation::Zero.accepts(Some(1)));
        assert!(!ExitExpectation::Zero.accepts(None));
        assert!(ExitExpectation::NonZero.accepts(Some(3)));
        assert!(ExitExpectation::NonZero.accepts(None));
        assert!(!ExitExpectation::NonZero.accepts(Some(0)));
        assert!(ExitExpectation::Code(1).accepts(Some(1)));
        assert!(!ExitExpectation::Code(1).accepts(Some(2)));
        assert!(!ExitExpectation::Code(1).accepts(None));
    }

    #[test]
    fn exit_expectation_from_json() {
        let v: Vec<ExitExpectation> = serde_json::from_str(r#"["zero", "non-zero", 1]"#).unwrap();
        assert_eq!(
            v,
            [
                ExitExpectation::Zero,
                ExitExpectation::NonZero,
                ExitExpectation::Code(1)
            ]
        );
        assert!(serde_json::from_str::<ExitExpectation>(r#""sometimes""#).is_err());
    }

    #[test]
    fn output_checks() {
        let out = b"main.adept:2:1: error: Class is missing constructor\n";
        assert!(OutputCheck::Any.accepts(b""));
        assert!(OutputCheck::contains("missing constructor").accepts(out));
        assert!(!OutputCheck::NotContains(b"error".to_vec()).accepts(out));
        assert!(OutputCheck::Matches(Regex::new(r"^main\.adept:\d+:\d+:").unwrap()).accepts(out));
        assert!(OutputCheck::custom(|o| o.ends_with(b"\n")).accepts(out));
    }

    #[test]
    fn platform_restriction() {
        let here = Case::new("here", ["x"]).only_on(Platform::current());
        assert!(here.applies_here());
        let other = match Platform::current() {
            Platform::Unix => Platform::Windows,
            Platform::Windows => Platform::Unix,
        };
        assert!(!Case::new("there", ["x"]).only_on(other).applies_here());
        assert!(Case::new("anywhere", ["x"]).applies_here());
    }
}
