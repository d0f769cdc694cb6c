// src/error.rs
use std::{io, path::PathBuf};

/// Everything that can stop a token-table generation run.
///
/// Schema variants name the offending entry; none of them are retried, since the
/// table is static input and a second run would hit the same problem.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("duplicate token short name '{name}'")]
    DuplicateShortName { name: String },

    #[error("token alias '{alias}' reuses the short name of an existing token")]
    AliasShadowsToken { alias: String },

    #[error("token alias '{alias}' is declared more than once")]
    DuplicateAlias { alias: String },

    #[error("'{first}' and '{second}' both generate the constant {constant}")]
    ConstantCollision {
        first: String,
        second: String,
        constant: String,
    },

    #[error("invalid token short name {name:?}: expected ASCII letters, digits or '_'")]
    InvalidShortName { name: String },

    #[error("token table has {count} entries but identifiers stop at {max:#X}")]
    TooManyTokens { count: usize, max: usize },

    #[error("token alias '{alias}' failed to resolve destination '{target}'")]
    UnresolvedAlias { alias: String, target: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }

    /// Schema errors come from the table itself; everything else is environmental.
    pub fn is_schema_error(&self) -> bool {
        !matches!(self, TableError::Io { .. })
    }
}
