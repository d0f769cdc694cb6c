// src/compiler/io.rs
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use serde::Serialize;
use tempfile::NamedTempFile;

use super::{Artifacts, CompiledTable};
use crate::{
    error::TableError,
    tokens::{Category, PayloadKind},
};

impl Artifacts {
    /// Writes both artifacts so that a failed run never leaves a half-written file behind.
    ///
    /// Each artifact goes to a temporary file beside its destination first; the renames
    /// happen only once both temporaries are complete. Dropped temporaries delete themselves.
    pub fn write_to(&self, header: &Path, source: &Path) -> Result<(), TableError> {
        let instant = Instant::now();
        let staged_header = stage(header, self.declarations.as_bytes())?;
        let staged_source = stage(source, self.definitions.as_bytes())?;

        persist(staged_header, header)?;
        persist(staged_source, source)?;

        log::debug!(
            "[io] wrote {} + {} bytes in {} ms",
            self.declarations.len(),
            self.definitions.len(),
            instant.elapsed().as_millis()
        );
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn temp_beside(path: &Path) -> Result<NamedTempFile, TableError> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| TableError::io(dir, e))?;
    NamedTempFile::new_in(dir).map_err(|e| TableError::io(path, e))
}

fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, TableError> {
    let mut tmp = temp_beside(path)?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| TableError::io(path, e))?;
    Ok(tmp)
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<(), TableError> {
    tmp.persist(path)
        .map(|_| ())
        .map_err(|e| TableError::io(path, e.error))
}

// -------------------- JSON manifest --------------------

#[derive(Serialize)]
struct ManifestDisk<'a> {
    token_count: usize,
    max_token: u32,
    first_keyword: u32,
    tokens: Vec<TokenDisk<'a>>,
    aliases: Vec<AliasDisk<'a>>,
    keywords: Vec<&'a str>,
}

#[derive(Serialize)]
struct TokenDisk<'a> {
    id: u32,
    short_name: &'a str,
    constant: String,
    display_name: String,
    category: Category,
    payload: PayloadKind,
    payload_code: char,
}

#[derive(Serialize)]
struct AliasDisk<'a> {
    short_name: &'a str,
    constant: String,
    display_name: String,
    target: &'a str,
    id: u32,
}

impl<'a> From<&'a CompiledTable<'a>> for ManifestDisk<'a> {
    fn from(c: &'a CompiledTable<'a>) -> Self {
        Self {
            token_count: c.len(),
            max_token: c.max_token(),
            first_keyword: c.first_keyword.0,
            tokens: c
                .entries
                .iter()
                .map(|e| TokenDisk {
                    id: e.id.0,
                    short_name: e.def.short_name.as_ref(),
                    constant: e.def.constant_name(),
                    display_name: e.def.display_name().into_owned(),
                    category: e.def.category,
                    payload: e.def.payload,
                    payload_code: e.def.payload.encode(),
                })
                .collect(),
            aliases: c
                .aliases
                .iter()
                .map(|a| AliasDisk {
                    short_name: a.alias.short_name.as_ref(),
                    constant: a.alias.constant_name(),
                    display_name: a.alias.display_name().into_owned(),
                    target: a.alias.target.as_ref(),
                    id: a.id.0,
                })
                .collect(),
            keywords: c
                .keywords()
                .iter()
                .map(|e| e.def.short_name.as_ref())
                .collect(),
        }
    }
}

/// Machine-readable listing of the compiled table, for tooling that cannot read C.
pub fn save_manifest_json(path: &Path, compiled: &CompiledTable<'_>) -> Result<(), TableError> {
    let tmp = temp_beside(path)?;
    {
        let mut w = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut w, &ManifestDisk::from(compiled))
            .map_err(|e| TableError::io(path, e.into()))?;
        w.write_all(b"\n")
            .and_then(|()| w.flush())
            .map_err(|e| TableError::io(path, e))?;
    }
    persist(tmp, path)
}
