// src/tokens/defs.rs
use std::borrow::Cow;

use serde::Serialize;

/// What kind of lexical unit a token is. Only `Keyword` changes how the table is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Plain,
    Word,
    Keyword,
    Operator,
    Literal,
    Polymorph,
    Preprocessor,
}

/// Shape of the out-of-band data the lexer attaches to a token instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PayloadKind {
    IdOnly = 1,
    CString = 2,
    LenString = 3,
    Memory = 4,
}

/// Added to a payload ordinal to get its printable encoding (`IdOnly` -> 'a').
/// Both generated artifacts use this offset; the compiler decodes one with constants from the other.
pub const PAYLOAD_ENCODE_OFFSET: u8 = b'a' - 1;

impl PayloadKind {
    pub const ALL: [PayloadKind; 4] = [
        PayloadKind::IdOnly,
        PayloadKind::CString,
        PayloadKind::LenString,
        PayloadKind::Memory,
    ];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn encode(self) -> char {
        char::from(PAYLOAD_ENCODE_OFFSET + self.ordinal())
    }

    pub fn decode(c: char) -> Option<Self> {
        let byte = u8::try_from(c).ok()?;
        let ordinal = byte.checked_sub(PAYLOAD_ENCODE_OFFSET)?;
        Self::ALL.into_iter().find(|k| k.ordinal() == ordinal)
    }

    /// Suffix of the `TOKEN_EXTRA_DATA_FORMAT_*` constant.
    pub fn constant_suffix(self) -> &'static str {
        match self {
            PayloadKind::IdOnly => "ID_ONLY",
            PayloadKind::CString => "C_STRING",
            PayloadKind::LenString => "LEN_STRING",
            PayloadKind::Memory => "MEMORY",
        }
    }
}

/// One row of the token table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDefinition {
    pub short_name: Cow<'static, str>,
    pub category: Category,
    pub payload: PayloadKind,
    pub display_name: Option<Cow<'static, str>>,
}

impl TokenDefinition {
    pub const fn new(short_name: &'static str, category: Category, payload: PayloadKind) -> Self {
        Self {
            short_name: Cow::Borrowed(short_name),
            category,
            payload,
            display_name: None,
        }
    }

    pub const fn named(
        short_name: &'static str,
        category: Category,
        payload: PayloadKind,
        display_name: &'static str,
    ) -> Self {
        Self {
            short_name: Cow::Borrowed(short_name),
            category,
            payload,
            display_name: Some(Cow::Borrowed(display_name)),
        }
    }

    pub fn owned(short_name: String, category: Category, payload: PayloadKind) -> Self {
        Self {
            short_name: Cow::Owned(short_name),
            category,
            payload,
            display_name: None,
        }
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        self.category == Category::Keyword
    }

    /// Label used in diagnostics.
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.display_name {
            Some(name) => Cow::Borrowed(name.as_ref()),
            None if self.is_keyword() => Cow::Owned(format!("{} keyword", self.short_name)),
            None => default_display_name(&self.short_name),
        }
    }

    /// Generated C constant, e.g. `TOKEN_BIT_OR`.
    pub fn constant_name(&self) -> String {
        constant_name(&self.short_name)
    }
}

/// A second symbolic name for an existing token. Never gets an identifier of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAlias {
    pub short_name: Cow<'static, str>,
    pub display_name: Option<Cow<'static, str>>,
    pub target: Cow<'static, str>,
}

impl TokenAlias {
    pub const fn new(
        short_name: &'static str,
        display_name: &'static str,
        target: &'static str,
    ) -> Self {
        Self {
            short_name: Cow::Borrowed(short_name),
            display_name: Some(Cow::Borrowed(display_name)),
            target: Cow::Borrowed(target),
        }
    }

    pub fn owned(short_name: String, target: String) -> Self {
        Self {
            short_name: Cow::Owned(short_name),
            display_name: None,
            target: Cow::Owned(target),
        }
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.display_name {
            Some(name) => Cow::Borrowed(name.as_ref()),
            None => default_display_name(&self.short_name),
        }
    }

    pub fn constant_name(&self) -> String {
        constant_name(&self.short_name)
    }
}

fn default_display_name(short_name: &str) -> Cow<'_, str> {
    if short_name.contains('_') {
        Cow::Owned(short_name.replace('_', " "))
    } else {
        Cow::Borrowed(short_name)
    }
}

pub fn constant_name(short_name: &str) -> String {
    format!("TOKEN_{}", short_name.to_ascii_uppercase())
}

/// Short names end up inside C identifiers.
pub fn is_valid_short_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_encoding_is_printable_and_reversible() {
        for kind in PayloadKind::ALL {
            let c = kind.encode();
            assert!(c.is_ascii_graphic(), "{kind:?} -> {c:?}");
            assert_eq!(PayloadKind::decode(c), Some(kind));
        }
        assert_eq!(PayloadKind::IdOnly.encode(), 'a');
        assert_eq!(PayloadKind::Memory.encode(), 'd');
        assert_eq!(PayloadKind::decode('e'), None);
        assert_eq!(PayloadKind::decode('`'), None);
    }

    #[test]
    fn display_name_defaults() {
        let op = TokenDefinition::new("bracket_open", Category::Operator, PayloadKind::IdOnly);
        assert_eq!(op.display_name(), "bracket open");

        let kw = TokenDefinition::new("va_arg", Category::Keyword, PayloadKind::IdOnly);
        assert_eq!(kw.display_name(), "va_arg keyword");

        let named = TokenDefinition::named(
            "bit_or",
            Category::Operator,
            PayloadKind::IdOnly,
            "bitwise or",
        );
        assert_eq!(named.display_name(), "bitwise or");
    }

    #[test]
    fn constant_names_are_uppercased() {
        let t = TokenDefinition::new("POD", Category::Keyword, PayloadKind::IdOnly);
        assert_eq!(t.constant_name(), "TOKEN_POD");
        let a = TokenAlias::owned("bit_and".into(), "address".into());
        assert_eq!(a.constant_name(), "TOKEN_BIT_AND");
        assert_eq!(a.display_name(), "bit and");
    }

    #[test]
    fn short_name_shape() {
        assert!(is_valid_short_name("bit_lgc_rshift_assign"));
        assert!(is_valid_short_name("POD"));
        assert!(!is_valid_short_name(""));
        assert!(!is_valid_short_name("a-b"));
        assert!(!is_valid_short_name("has space"));
    }
}
