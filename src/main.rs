// src/main.rs
// Regenerates the compiler's token table sources.
// Usage:
//   cargo run                                   # include/TOKEN/token_data.h + src/TOKEN/token_data.c
//   cargo run -- out/token_data.h out/token_data.c
//   TOKENGEN_JSON=tables/tokens.json cargo run  # also dump the JSON manifest
//   TOKENGEN_STAMP=0 cargo run                  # reproducible iteration stamp

use anyhow::{Context, Result};
use tokengen::{
    compiler::generate,
    config::{GenConfig, init_logging},
    tokens::TokenTable,
};

fn main() -> Result<()> {
    init_logging();
    let config = GenConfig::from_env_and_args()?;

    let table = TokenTable::builtin();
    println!(
        "[tokengen] {} definitions ({} keywords), {} aliases",
        table.definitions.len(),
        table.keyword_count(),
        table.aliases.len()
    );

    let summary = generate(&table, &config).context("token table generation failed")?;
    println!(
        "[tokengen] keywords start at {}, iteration {:#010X}",
        summary.first_keyword, summary.stamp.0
    );
    println!(
        "[tokengen] wrote {} and {}",
        config.header_out.display(),
        config.source_out.display()
    );
    Ok(())
}
