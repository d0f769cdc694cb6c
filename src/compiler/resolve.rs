// src/compiler/resolve.rs
use hashbrown::HashMap;

use super::{Entry, ResolvedAlias, TokenId};
use crate::{
    error::TableError,
    tokens::{MAX_TOKENS, TokenAlias, TokenDefinition},
};

/// Numbers the ordered definitions `0..N-1`.
///
/// Identifiers depend only on table order; the iteration stamp never reaches this code.
pub fn assign_identifiers<'t>(ordered: &[&'t TokenDefinition]) -> Result<Vec<Entry<'t>>, TableError> {
    if ordered.len() > MAX_TOKENS {
        return Err(TableError::TooManyTokens {
            count: ordered.len(),
            max: MAX_TOKENS - 1,
        });
    }
    Ok(ordered
        .iter()
        .enumerate()
        .map(|(i, &def)| Entry {
            id: TokenId(i as u32),
            def,
        })
        .collect())
}

/// Points every alias at the identifier of the definition whose short name it targets.
pub fn resolve_aliases<'t>(
    entries: &[Entry<'t>],
    aliases: &'t [TokenAlias],
) -> Result<Vec<ResolvedAlias<'t>>, TableError> {
    let by_name: HashMap<&str, TokenId> = entries
        .iter()
        .map(|e| (e.def.short_name.as_ref(), e.id))
        .collect();

    aliases
        .iter()
        .map(|alias| {
            let id = by_name.get(alias.target.as_ref()).copied().ok_or_else(|| {
                TableError::UnresolvedAlias {
                    alias: alias.short_name.to_string(),
                    target: alias.target.to_string(),
                }
            })?;
            log::debug!("[resolve] {} -> {} ({id})", alias.short_name, alias.target);
            Ok(ResolvedAlias { alias, id })
        })
        .collect()
}
