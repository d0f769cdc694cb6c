// src/harness/manifest.rs
// JSON case manifest:
//
//   {
//     "src_root": "src",
//     "cases": [
//       { "name": "address", "args": ["{src}/address/main.adept"] },
//       { "name": "missing ctor", "args": ["{src}/class_missing_constructor/main.adept"],
//         "check": { "contains": "error: Class is missing constructor" }, "exit": 1 },
//       { "name": "layout", "program": "{src}/class_extends/main", "args": [],
//         "check": { "matches": "Animal:\\n - __vtable__" }, "only_on": "unix" }
//     ]
//   }
//
// `{src}` expands to `src_root` (relative to the manifest file), `{exe}` to the executable under test.

use std::{
    fs,
    path::{Path, PathBuf},
};

use regex::bytes::Regex;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use super::{Case, ExitExpectation, HarnessError, OutputCheck, Platform, Program};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDisk {
    #[serde(default)]
    src_root: Option<String>,
    cases: Vec<CaseDisk>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseDisk {
    name: String,
    #[serde(default)]
    program: Option<String>,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    check: Option<CheckDisk>,
    #[serde(default)]
    exit: ExitExpectation,
    #[serde(default)]
    only_on: Option<Platform>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum CheckDisk {
    Any,
    Contains(String),
    NotContains(String),
    Matches(#[serde_as(as = "DisplayFromStr")] Regex),
}

impl From<CheckDisk> for OutputCheck {
    fn from(d: CheckDisk) -> Self {
        match d {
            CheckDisk::Any => OutputCheck::Any,
            CheckDisk::Contains(s) => OutputCheck::Contains(s.into_bytes()),
            CheckDisk::NotContains(s) => OutputCheck::NotContains(s.into_bytes()),
            CheckDisk::Matches(re) => OutputCheck::Matches(re),
        }
    }
}

struct Expander {
    src: String,
    exe: String,
}

impl Expander {
    fn expand(&self, s: &str) -> String {
        s.replace("{src}", &self.src).replace("{exe}", &self.exe)
    }
}

/// Reads a manifest file into runnable cases.
pub fn load_manifest(path: &Path, executable: &Path) -> Result<Vec<Case>, HarnessError> {
    let text = fs::read_to_string(path).map_err(|source| HarnessError::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or(Path::new(""));
    parse_manifest(&text, base, executable).map_err(|source| HarnessError::ParseManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// `base` is the directory `src_root` is relative to.
pub fn parse_manifest(
    text: &str,
    base: &Path,
    executable: &Path,
) -> Result<Vec<Case>, serde_json::Error> {
    let disk: ManifestDisk = serde_json::from_str(text)?;
    let src_root = match &disk.src_root {
        Some(root) => base.join(root),
        None => base.to_path_buf(),
    };
    let ex = Expander {
        src: src_root.display().to_string(),
        exe: executable.display().to_string(),
    };

    let cases: Vec<Case> = disk
        .cases
        .into_iter()
        .map(|c| Case {
            program: match c.program {
                Some(p) => Program::Path(PathBuf::from(ex.expand(&p))),
                None => Program::UnderTest,
            },
            args: c.args.iter().map(|a| ex.expand(a)).collect(),
            check: c.check.map_or(OutputCheck::Any, OutputCheck::from),
            exit: c.exit,
            only_on: c.only_on,
            name: c.name,
        })
        .collect();
    log::debug!("[manifest] {} cases, src root {}", cases.len(), ex.src);
    Ok(cases)
}

/// A bare name is looked up on `PATH`; anything with a directory component must exist.
pub fn resolve_executable(arg: &str) -> Result<PathBuf, HarnessError> {
    let p = Path::new(arg);
    if p.components().count() > 1 || p.is_absolute() {
        return if p.is_file() {
            Ok(p.to_path_buf())
        } else {
            Err(HarnessError::ExecutableNotFound {
                name: arg.into(),
                source: None,
            })
        };
    }
    which::which(arg).map_err(|e| HarnessError::ExecutableNotFound {
        name: arg.into(),
        source: Some(e),
    })
}
