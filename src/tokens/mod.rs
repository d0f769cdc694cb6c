// src/tokens/mod.rs
pub mod defs;
pub mod table;

use hashbrown::{HashMap, HashSet, hash_map::Entry};

pub use defs::{
    Category, PAYLOAD_ENCODE_OFFSET, PayloadKind, TokenAlias, TokenDefinition, constant_name,
    is_valid_short_name,
};

use crate::error::TableError;

/// Identifiers must fit the compiler's `tokenid_t` (`unsigned short`).
pub const MAX_TOKENS: usize = u16::MAX as usize + 1;

/// The declarative input: definitions in author order plus aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    pub definitions: Vec<TokenDefinition>,
    pub aliases: Vec<TokenAlias>,
}

impl TokenTable {
    pub fn new(definitions: Vec<TokenDefinition>, aliases: Vec<TokenAlias>) -> Self {
        Self {
            definitions,
            aliases,
        }
    }

    /// The table the compiler is built with.
    pub fn builtin() -> Self {
        Self::new(table::DEFINITIONS.to_vec(), table::ALIASES.to_vec())
    }

    pub fn keyword_count(&self) -> usize {
        self.definitions.iter().filter(|d| d.is_keyword()).count()
    }

    /// Checks the schema invariants that must hold before anything is rendered.
    ///
    /// Alias targets are not checked here; they resolve against the ordered table in
    /// [`crate::compiler::resolve_aliases`].
    pub fn validate(&self) -> Result<(), TableError> {
        if self.definitions.len() > MAX_TOKENS {
            return Err(TableError::TooManyTokens {
                count: self.definitions.len(),
                max: MAX_TOKENS - 1,
            });
        }

        let mut short_names: HashSet<&str> = HashSet::with_capacity(self.definitions.len());
        // constant name -> the short name that produced it first
        let mut constants: HashMap<String, &str> = HashMap::with_capacity(self.definitions.len());

        for def in &self.definitions {
            let name = def.short_name.as_ref();
            if !is_valid_short_name(name) {
                return Err(TableError::InvalidShortName { name: name.into() });
            }
            if !short_names.insert(name) {
                return Err(TableError::DuplicateShortName { name: name.into() });
            }
            claim_constant(&mut constants, def.constant_name(), name)?;
        }

        let mut alias_names: HashSet<&str> = HashSet::with_capacity(self.aliases.len());
        for alias in &self.aliases {
            let name = alias.short_name.as_ref();
            if !is_valid_short_name(name) {
                return Err(TableError::InvalidShortName { name: name.into() });
            }
            if short_names.contains(name) {
                return Err(TableError::AliasShadowsToken { alias: name.into() });
            }
            if !alias_names.insert(name) {
                return Err(TableError::DuplicateAlias { alias: name.into() });
            }
            claim_constant(&mut constants, alias.constant_name(), name)?;
        }

        log::debug!(
            "[tokens] validated {} definitions, {} aliases",
            self.definitions.len(),
            self.aliases.len()
        );
        Ok(())
    }
}

fn claim_constant<'a>(
    constants: &mut HashMap<String, &'a str>,
    constant: String,
    owner: &'a str,
) -> Result<(), TableError> {
    match constants.entry(constant) {
        Entry::Occupied(e) => Err(TableError::ConstantCollision {
            first: (*e.get()).to_string(),
            second: owner.to_string(),
            constant: e.key().clone(),
        }),
        Entry::Vacant(e) => {
            e.insert(owner);
            Ok(())
        }
    }
}
