// src/compiler/render.rs
// Text rendering of the two generated C files:
//   token_data.h  constants, payload encodings, extern declarations
//   token_data.c  name table, payload string, keyword list
// Both are written in identifier order so they line up position for position.

use std::{borrow::Cow, io::Write};

use super::{CompiledTable, IterationStamp, TokenId};
use crate::tokens::{PAYLOAD_ENCODE_OFFSET, PayloadKind};

const BANNER: &str = "\n// This file was auto-generated by 'tokengen'\n\n";
const HEADER_GUARD: &str = "_ISAAC_TOKEN_DATA_H";
/// Length of the `TOKEN_` prefix.
const TOKEN_PREFIX_LEN: usize = 6;

/// Compatibility shim for code that still names the pre-lexed package tokens.
/// Reproduced as-is; none of it is derived from or checked against the table.
pub const LEGACY_PKG_CONSTANTS: &str = "
// DEPRECATED: Pre-lexed files will probably be removed in the future.
// Used in place of common sequences in packages.
// Not recognized by parser.
#define TOKEN_PKG_MIN         TOKEN_PKG_WBOOL
#define TOKEN_PKG_WBOOL       0x0000000D0
#define TOKEN_PKG_WBYTE       0x0000000D1
#define TOKEN_PKG_WDOUBLE     0x0000000D2
#define TOKEN_PKG_WFLOAT      0x0000000D3
#define TOKEN_PKG_WINT        0x0000000D4
#define TOKEN_PKG_WLONG       0x0000000D5
#define TOKEN_PKG_WSHORT      0x0000000D6
#define TOKEN_PKG_WUBYTE      0x0000000D7
#define TOKEN_PKG_WUINT       0x0000000D8
#define TOKEN_PKG_WULONG      0x0000000D9
#define TOKEN_PKG_WUSHORT     0x0000000DA
#define TOKEN_PKG_WUSIZE      0x0000000DB
#define TOKEN_PKG_MAX         TOKEN_PKG_WUSIZE
";

/// Both generated files, fully rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub declarations: String,
    pub definitions: String,
}

impl Artifacts {
    pub fn render(compiled: &CompiledTable<'_>, stamp: IterationStamp) -> std::io::Result<Self> {
        let mut declarations = Vec::new();
        write_declarations(compiled, stamp, &mut declarations)?;
        let mut definitions = Vec::new();
        write_definitions(compiled, &mut definitions)?;

        Ok(Self {
            declarations: into_string(declarations)?,
            definitions: into_string(definitions)?,
        })
    }
}

fn into_string(bytes: Vec<u8>) -> std::io::Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Header: one `#define` per token and alias plus the derived constants.
pub fn write_declarations<W: Write>(
    compiled: &CompiledTable<'_>,
    stamp: IterationStamp,
    out: &mut W,
) -> std::io::Result<()> {
    out.write_all(BANNER.as_bytes())?;
    writeln!(out, "#ifndef {HEADER_GUARD}")?;
    writeln!(out, "#define {HEADER_GUARD}")?;
    writeln!(out)?;
    writeln!(out, "#define TOKEN_ITERATION_VERSION 0x{:08X}", stamp.0)?;
    writeln!(out)?;

    // Aliases are padded to the same column, but do not widen it.
    let width = compiled
        .entries
        .iter()
        .map(|e| e.def.short_name.len())
        .max()
        .unwrap_or(0)
        + TOKEN_PREFIX_LEN;

    for e in &compiled.entries {
        write_constant(out, &e.def.constant_name(), width, e.id)?;
    }
    for a in &compiled.aliases {
        write_constant(out, &a.alias.constant_name(), width, a.id)?;
    }
    writeln!(out)?;

    writeln!(out, "#define MAX_LEX_TOKEN 0x{:08X}", compiled.max_token())?;
    writeln!(out, "#define BEGINNING_OF_KEYWORD_TOKENS {}", compiled.first_keyword)?;
    writeln!(out)?;

    let formats: Vec<(String, PayloadKind)> = PayloadKind::ALL
        .into_iter()
        .map(|k| (format!("TOKEN_EXTRA_DATA_FORMAT_{}", k.constant_suffix()), k))
        .collect();
    let format_width = formats.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, kind) in &formats {
        writeln!(
            out,
            "#define {name:<format_width$} 0x{:08X}",
            u32::from(PAYLOAD_ENCODE_OFFSET + kind.ordinal())
        )?;
    }
    writeln!(out)?;

    writeln!(out, "extern const char *global_token_name_table[];")?;
    writeln!(out, "extern const char global_token_extra_format_table[];")?;
    writeln!(out)?;
    writeln!(out, "extern const char *global_token_keywords_list[];")?;
    writeln!(out, "extern unsigned long long global_token_keywords_list_length;")?;

    out.write_all(LEGACY_PKG_CONSTANTS.as_bytes())?;
    writeln!(out)?;
    writeln!(out, "#endif // {HEADER_GUARD}")?;
    Ok(())
}

fn write_constant<W: Write>(out: &mut W, name: &str, width: usize, id: TokenId) -> std::io::Result<()> {
    writeln!(out, "#define {name:<width$} {id}")
}

/// Source: name table, payload encoding string and keyword list. Aliases never appear here.
pub fn write_definitions<W: Write>(compiled: &CompiledTable<'_>, out: &mut W) -> std::io::Result<()> {
    out.write_all(BANNER.as_bytes())?;

    let names: Vec<String> = compiled
        .entries
        .iter()
        .map(|e| c_escape(&e.def.display_name()).into_owned())
        .collect();
    let longest = names.iter().map(String::len).max().unwrap_or(0);

    writeln!(out, "const char *global_token_name_table[] = {{")?;
    for (e, name) in compiled.entries.iter().zip(&names) {
        let padding = " ".repeat(longest - name.len() + 1);
        writeln!(out, "    \"{name}\",{padding}// {}", e.id)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    let encoded: String = compiled.entries.iter().map(|e| e.def.payload.encode()).collect();
    writeln!(out, "const char global_token_extra_format_table[] = \"{encoded}\";")?;
    writeln!(out)?;

    writeln!(out, "const char *global_token_keywords_list[] = {{")?;
    for e in compiled.keywords() {
        writeln!(out, "    \"{}\",", e.def.short_name)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(
        out,
        "unsigned long long global_token_keywords_list_length = {};",
        compiled.keywords().len()
    )?;
    Ok(())
}

/// Escapes a display name for use inside a C string literal.
fn c_escape(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| matches!(c, '"' | '\\') || c.is_control()) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        compiler::compile,
        tokens::{Category, TokenAlias, TokenDefinition, TokenTable},
    };

    fn small_table() -> TokenTable {
        TokenTable::new(
            vec![
                TokenDefinition::new("none", Category::Plain, PayloadKind::IdOnly),
                TokenDefinition::new("word", Category::Word, PayloadKind::CString),
                TokenDefinition::new("break", Category::Keyword, PayloadKind::IdOnly),
                TokenDefinition::new("alpha", Category::Keyword, PayloadKind::IdOnly),
            ],
            vec![TokenAlias::owned("ident".into(), "word".into())],
        )
    }

    #[test]
    fn declarations_layout() {
        let table = small_table();
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0x1234)).unwrap();

        let expected_head = "\n// This file was auto-generated by 'tokengen'\n\n\
#ifndef _ISAAC_TOKEN_DATA_H\n\
#define _ISAAC_TOKEN_DATA_H\n\
\n\
#define TOKEN_ITERATION_VERSION 0x00001234\n\
\n\
#define TOKEN_NONE  0x00000000\n\
#define TOKEN_WORD  0x00000001\n\
#define TOKEN_ALPHA 0x00000002\n\
#define TOKEN_BREAK 0x00000003\n\
#define TOKEN_IDENT 0x00000001\n\
\n\
#define MAX_LEX_TOKEN 0x00000003\n\
#define BEGINNING_OF_KEYWORD_TOKENS 0x00000002\n\
\n\
#define TOKEN_EXTRA_DATA_FORMAT_ID_ONLY    0x00000061\n\
#define TOKEN_EXTRA_DATA_FORMAT_C_STRING   0x00000062\n\
#define TOKEN_EXTRA_DATA_FORMAT_LEN_STRING 0x00000063\n\
#define TOKEN_EXTRA_DATA_FORMAT_MEMORY     0x00000064\n\
\n\
extern const char *global_token_name_table[];\n\
extern const char global_token_extra_format_table[];\n\
\n\
extern const char *global_token_keywords_list[];\n\
extern unsigned long long global_token_keywords_list_length;\n";
        assert_eq!(&a.declarations[..expected_head.len()], expected_head);
        assert!(a.declarations.contains(LEGACY_PKG_CONSTANTS));
        assert!(a.declarations.ends_with("\n#endif // _ISAAC_TOKEN_DATA_H\n"));
    }

    #[test]
    fn definitions_layout() {
        let table = small_table();
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0)).unwrap();

        let expected = "\n// This file was auto-generated by 'tokengen'\n\n\
const char *global_token_name_table[] = {\n\
\x20   \"none\",          // 0x00000000\n\
\x20   \"word\",          // 0x00000001\n\
\x20   \"alpha keyword\", // 0x00000002\n\
\x20   \"break keyword\", // 0x00000003\n\
};\n\
\n\
const char global_token_extra_format_table[] = \"abaa\";\n\
\n\
const char *global_token_keywords_list[] = {\n\
\x20   \"alpha\",\n\
\x20   \"break\",\n\
};\n\
\n\
unsigned long long global_token_keywords_list_length = 2;\n";
        assert_eq!(a.definitions, expected);
    }

    #[test]
    fn display_names_are_escaped() {
        assert_eq!(c_escape("plain"), "plain");
        assert_eq!(c_escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(c_escape("back\\slash"), "back\\\\slash");
        assert_eq!(c_escape("bell\u{7}"), "bell\\007");
    }

    #[test]
    fn empty_table_renders() {
        let table = TokenTable::default();
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0)).unwrap();
        assert!(a.declarations.contains("#define MAX_LEX_TOKEN 0xFFFFFFFF\n"));
        assert!(a.declarations.contains("#define BEGINNING_OF_KEYWORD_TOKENS 0x00000000\n"));
        assert!(a.definitions.contains("global_token_extra_format_table[] = \"\";"));
        assert!(a.definitions.contains("global_token_keywords_list_length = 0;"));
    }
}
