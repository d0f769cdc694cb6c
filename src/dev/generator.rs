// src/dev/generator.rs
// Seeded random token tables for the fuzzer and the property tests.
// Every generated table is valid: names are unique (also after upper-casing)
// and every alias targets an existing definition.

use rand::Rng;

use crate::tokens::{Category, PayloadKind, TokenAlias, TokenDefinition, TokenTable};

const CATEGORIES: [Category; 7] = [
    Category::Plain,
    Category::Word,
    Category::Keyword,
    Category::Operator,
    Category::Literal,
    Category::Polymorph,
    Category::Preprocessor,
];

fn random_stem<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(1..=8);
    let upper = rng.random_bool(0.15);
    (0..len)
        .map(|_| {
            let c = char::from(b'a' + rng.random_range(0..26u8));
            if upper { c.to_ascii_uppercase() } else { c }
        })
        .collect()
}

/// `n_defs` definitions (roughly half keywords) and `n_aliases` aliases, in random author order.
///
/// Aliases need at least one definition to point at; with `n_defs == 0` none are generated.
pub fn gen_random_table<R: Rng>(rng: &mut R, n_defs: usize, n_aliases: usize) -> TokenTable {
    let definitions: Vec<TokenDefinition> = (0..n_defs)
        .map(|i| {
            let category = if rng.random_bool(0.5) {
                Category::Keyword
            } else {
                CATEGORIES[rng.random_range(0..CATEGORIES.len())]
            };
            let payload = PayloadKind::ALL[rng.random_range(0..PayloadKind::ALL.len())];
            let name = format!("{}_d{i}", random_stem(rng));
            let mut def = TokenDefinition::owned(name, category, payload);
            if rng.random_bool(0.2) {
                def.display_name = Some(format!("display {i}").into());
            }
            def
        })
        .collect();

    let aliases: Vec<TokenAlias> = if definitions.is_empty() {
        Vec::new()
    } else {
        (0..n_aliases)
            .map(|i| {
                let target = &definitions[rng.random_range(0..definitions.len())];
                TokenAlias::owned(
                    format!("{}_a{i}", random_stem(rng)),
                    target.short_name.to_string(),
                )
            })
            .collect()
    };

    TokenTable::new(definitions, aliases)
}
