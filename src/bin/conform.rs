// src/bin/conform.rs
// Runs the end-to-end case manifest against a compiler executable.
// Usage:
//   cargo run --bin conform -- <executable> [MANIFEST]   # default manifest: e2e/cases.json
//   CONFORM_PARALLEL=1  run cases concurrently (report order is unchanged)
//   CONFORM_COLOR=0     no ANSI colors

use std::{env, path::PathBuf, process};

use anyhow::{Context, Result, bail};
use tokengen::{
    config::{DEFAULT_MANIFEST, HarnessConfig, init_logging},
    harness::{load_manifest, resolve_executable, run},
};

fn main() -> Result<()> {
    init_logging();
    let mut args = env::args().skip(1);
    let Some(exe) = args.next() else {
        bail!("conform requires executable location\n  conform <executable> [MANIFEST]");
    };
    let manifest = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
    let config = HarnessConfig::from_env();

    let executable = resolve_executable(&exe)?;
    let cases = load_manifest(&manifest, &executable)
        .with_context(|| format!("loading {}", manifest.display()))?;
    println!(
        "[conform] {} cases from {} against {}",
        cases.len(),
        manifest.display(),
        executable.display()
    );

    let report = run(&cases, &executable, &config);
    print!("{}", report.render(config.color));
    process::exit(report.exit_code());
}
