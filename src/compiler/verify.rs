// src/compiler/verify.rs
// Independent re-check of a compiled table against the table it came from.
// Used by the fuzzer and the property tests; returns the first violation found.

use hashbrown::HashSet;

use super::{CompiledTable, TokenId};
use crate::tokens::{PayloadKind, TokenTable};

pub fn verify(table: &TokenTable, compiled: &CompiledTable<'_>) -> Result<(), String> {
    let n = compiled.entries.len();
    if n != table.definitions.len() {
        return Err(format!(
            "compiled {n} tokens from {} definitions",
            table.definitions.len()
        ));
    }

    for (i, e) in compiled.entries.iter().enumerate() {
        if e.id != TokenId(i as u32) {
            return Err(format!("entry {i} ('{}') has id {}", e.def.short_name, e.id));
        }
        if PayloadKind::decode(e.def.payload.encode()) != Some(e.def.payload) {
            return Err(format!(
                "payload of '{}' does not survive its encoding",
                e.def.short_name
            ));
        }
    }

    // Keyword block: contiguous, at the tail, strictly increasing by bytes.
    let boundary = compiled.first_keyword.0 as usize;
    if boundary > n {
        return Err(format!("keyword boundary {boundary} past end of table ({n})"));
    }
    let expected_keywords = table.keyword_count();
    if n - boundary != expected_keywords {
        return Err(format!(
            "boundary {boundary} leaves {} keywords, table has {expected_keywords}",
            n - boundary
        ));
    }
    if let Some(e) = compiled.entries[..boundary].iter().find(|e| e.def.is_keyword()) {
        return Err(format!("keyword '{}' sits before the boundary at {}", e.def.short_name, e.id));
    }
    if let Some(e) = compiled.keywords().iter().find(|e| !e.def.is_keyword()) {
        return Err(format!("'{}' sits in the keyword block at {}", e.def.short_name, e.id));
    }
    for w in compiled.keywords().windows(2) {
        if w[0].def.short_name.as_bytes() >= w[1].def.short_name.as_bytes() {
            return Err(format!(
                "keywords out of order: '{}' before '{}'",
                w[0].def.short_name, w[1].def.short_name
            ));
        }
    }

    // Non-keywords keep author order.
    let authored = table
        .definitions
        .iter()
        .filter(|d| !d.is_keyword())
        .map(|d| d.short_name.as_ref());
    let emitted = compiled.entries[..boundary]
        .iter()
        .map(|e| e.def.short_name.as_ref());
    if !authored.eq(emitted) {
        return Err("non-keyword tokens were reordered".into());
    }

    let mut seen = HashSet::with_capacity(n);
    if let Some(e) = compiled
        .entries
        .iter()
        .find(|e| !seen.insert(e.def.short_name.as_ref()))
    {
        return Err(format!("'{}' appears twice", e.def.short_name));
    }

    if compiled.aliases.len() != table.aliases.len() {
        return Err(format!(
            "resolved {} aliases out of {}",
            compiled.aliases.len(),
            table.aliases.len()
        ));
    }
    for a in &compiled.aliases {
        let target = compiled
            .entries
            .get(a.id.0 as usize)
            .ok_or_else(|| format!("alias '{}' points past the table", a.alias.short_name))?;
        if target.def.short_name != a.alias.target {
            return Err(format!(
                "alias '{}' resolved to '{}', expected '{}'",
                a.alias.short_name, target.def.short_name, a.alias.target
            ));
        }
    }

    Ok(())
}
