// src/config.rs
// Tool configuration: positional arguments plus environment variables.
//
//   tokengen [HEADER_OUT] [SOURCE_OUT]
//     TOKENGEN_JSON=<path>   also write the JSON manifest
//     TOKENGEN_STAMP=<u64>   pin the iteration stamp
//
//   conform <EXECUTABLE> [MANIFEST]
//     CONFORM_PARALLEL=1     run cases on the rayon pool
//     CONFORM_COLOR=0        plain output

use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};

use crate::compiler::IterationStamp;

pub const DEFAULT_HEADER_OUT: &str = "include/TOKEN/token_data.h";
pub const DEFAULT_SOURCE_OUT: &str = "src/TOKEN/token_data.c";
pub const DEFAULT_MANIFEST: &str = "e2e/cases.json";

/// Installs `env_logger` for the binaries; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}

/// Treat any value other than "0"/"false" (case-insensitive) as true.
pub fn env_flag_true(var: &str, default: bool) -> bool {
    env::var(var)
        .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
        .unwrap_or(default)
}

/// Parses `var` if it is set; an unparsable value is an error rather than a silent default.
pub fn env_parse<T>(var: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{var}={v:?} is not valid")),
        Err(_) => Ok(None),
    }
}

/// Like [`env_parse`] but falls back to `default` when unset.
pub fn env_or<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_parse(var)?.unwrap_or(default))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub header_out: PathBuf,
    pub source_out: PathBuf,
    pub json_out: Option<PathBuf>,
    /// `None` stamps with the current time.
    pub stamp: Option<IterationStamp>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            header_out: DEFAULT_HEADER_OUT.into(),
            source_out: DEFAULT_SOURCE_OUT.into(),
            json_out: None,
            stamp: None,
        }
    }
}

impl GenConfig {
    /// `args` excludes the program name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut args = args.into_iter();
        let mut cfg = Self::default();
        if let Some(h) = args.next() {
            cfg.header_out = h.into();
        }
        if let Some(s) = args.next() {
            cfg.source_out = s.into();
        }
        if let Some(extra) = args.next() {
            anyhow::bail!("unexpected argument {extra:?}; usage: tokengen [HEADER_OUT] [SOURCE_OUT]");
        }
        Ok(cfg)
    }

    pub fn from_env_and_args() -> Result<Self> {
        let mut cfg = Self::from_args(env::args().skip(1))?;
        cfg.json_out = env::var_os("TOKENGEN_JSON").map(PathBuf::from);
        cfg.stamp = env_parse::<u64>("TOKENGEN_STAMP")?.map(IterationStamp);
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub parallel: bool,
    pub color: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            color: true,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self {
            parallel: env_flag_true("CONFORM_PARALLEL", false),
            color: env_flag_true("CONFORM_COLOR", true),
        }
    }
}
