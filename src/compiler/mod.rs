// src/compiler/mod.rs
pub mod io;
pub mod order;
pub mod render;
pub mod resolve;
pub mod verify;

use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

pub use io::save_manifest_json;
pub use order::{Ordered, order};
pub use render::{Artifacts, LEGACY_PKG_CONSTANTS, write_declarations, write_definitions};
pub use resolve::{assign_identifiers, resolve_aliases};
pub use verify::verify;

use crate::{
    config::GenConfig,
    error::TableError,
    tokens::{TokenAlias, TokenDefinition, TokenTable},
};

/// Dense, zero-based token identifier. Printed the way the generated C code spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Cache-busting value embedded in the header. The only output allowed to change
/// between runs over the same table, and never used to compute a [`TokenId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationStamp(pub u64);

impl IterationStamp {
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(secs)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Entry<'t> {
    pub id: TokenId,
    pub def: &'t TokenDefinition,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedAlias<'t> {
    pub alias: &'t TokenAlias,
    pub id: TokenId,
}

/// A validated, ordered and numbered token table, ready to render.
#[derive(Debug, Clone)]
pub struct CompiledTable<'t> {
    /// Indexed by identifier.
    pub entries: Vec<Entry<'t>>,
    pub aliases: Vec<ResolvedAlias<'t>>,
    /// First keyword identifier; equals the token count when there are no keywords.
    pub first_keyword: TokenId,
}

impl<'t> CompiledTable<'t> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `MAX_LEX_TOKEN`: count minus one, wrapping to `0xFFFFFFFF` for an empty table.
    pub fn max_token(&self) -> u32 {
        (self.entries.len() as u32).wrapping_sub(1)
    }

    pub fn keywords(&self) -> &[Entry<'t>] {
        &self.entries[self.first_keyword.0 as usize..]
    }

    pub fn id_of(&self, short_name: &str) -> Option<TokenId> {
        self.entries
            .iter()
            .find(|e| e.def.short_name == short_name)
            .map(|e| e.id)
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|a| a.alias.short_name == short_name)
                    .map(|a| a.id)
            })
    }
}

/// Validates the table, orders it, assigns identifiers and resolves aliases.
pub fn compile(table: &TokenTable) -> Result<CompiledTable<'_>, TableError> {
    table.validate()?;

    let Ordered {
        tokens,
        first_keyword,
    } = order(&table.definitions);
    let entries = assign_identifiers(&tokens)?;
    let aliases = resolve_aliases(&entries, &table.aliases)?;

    Ok(CompiledTable {
        entries,
        aliases,
        first_keyword: TokenId(first_keyword as u32),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub tokens: usize,
    pub keywords: usize,
    pub aliases: usize,
    pub first_keyword: TokenId,
    pub stamp: IterationStamp,
}

/// Full run: compile, render both artifacts, then write them (and the optional JSON
/// manifest). Nothing is written unless compilation and rendering both succeed.
pub fn generate(table: &TokenTable, config: &GenConfig) -> Result<GenerationSummary, TableError> {
    let compiled = compile(table)?;
    let stamp = config.stamp.unwrap_or_else(IterationStamp::now);

    let artifacts = Artifacts::render(&compiled, stamp)
        .map_err(|e| TableError::io(&config.header_out, e))?;
    artifacts.write_to(&config.header_out, &config.source_out)?;
    log::debug!(
        "[generate] {} -> {}, {}",
        stamp.0,
        config.header_out.display(),
        config.source_out.display()
    );

    if let Some(json) = &config.json_out {
        save_manifest_json(json, &compiled)?;
        log::info!("[generate] wrote manifest {}", json.display());
    }

    Ok(GenerationSummary {
        tokens: compiled.len(),
        keywords: compiled.keywords().len(),
        aliases: compiled.aliases.len(),
        first_keyword: compiled.first_keyword,
        stamp,
    })
}
