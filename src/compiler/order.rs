// src/compiler/order.rs
use crate::tokens::TokenDefinition;

/// Definitions in final table order.
#[derive(Debug, Clone)]
pub struct Ordered<'t> {
    pub tokens: Vec<&'t TokenDefinition>,
    /// Position of the first keyword, or `tokens.len()` when there are none.
    pub first_keyword: usize,
}

/// Pushes keywords to the end of the table and sorts them by short name.
///
/// Stable partition followed by a sort of the keyword sub-range only: non-keyword
/// tokens keep the order they were written in. Keyword short names are unique, so
/// the sort needs no tie-break; comparison is byte-wise (`POD` sorts before `alias`).
pub fn order(definitions: &[TokenDefinition]) -> Ordered<'_> {
    let (mut tokens, keywords): (Vec<&TokenDefinition>, Vec<&TokenDefinition>) =
        definitions.iter().partition(|d| !d.is_keyword());

    let first_keyword = tokens.len();
    tokens.extend(keywords);
    tokens[first_keyword..].sort_by(|a, b| a.short_name.as_bytes().cmp(b.short_name.as_bytes()));

    log::debug!(
        "[order] {} tokens, {} keywords starting at {}",
        tokens.len(),
        tokens.len() - first_keyword,
        first_keyword
    );
    Ordered {
        tokens,
        first_keyword,
    }
}
