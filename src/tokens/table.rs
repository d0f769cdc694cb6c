// src/tokens/table.rs
//
// The compiler's token table. To add or remove a token, edit `DEFINITIONS`;
// identifiers, the keyword range and both generated files follow from it.
// Keywords may be listed in any order, they are sorted when the table is compiled.

use super::defs::{
    Category::{self, *},
    PayloadKind::{self, *},
    TokenAlias, TokenDefinition,
};

const fn tok(short_name: &'static str, category: Category, payload: PayloadKind) -> TokenDefinition {
    TokenDefinition::new(short_name, category, payload)
}

const fn tok_named(
    short_name: &'static str,
    category: Category,
    payload: PayloadKind,
    display_name: &'static str,
) -> TokenDefinition {
    TokenDefinition::named(short_name, category, payload, display_name)
}

const fn kw(short_name: &'static str) -> TokenDefinition {
    TokenDefinition::new(short_name, Keyword, IdOnly)
}

pub const DEFINITIONS: &[TokenDefinition] = &[
    tok("none", Plain, IdOnly),
    tok("word", Word, CString),
    tok("string", Literal, LenString),
    tok("cstring", Literal, CString),
    tok("add", Operator, IdOnly),
    tok("subtract", Operator, IdOnly),
    tok("multiply", Operator, IdOnly),
    tok("divide", Operator, IdOnly),
    tok("assign", Operator, IdOnly),
    tok("equals", Operator, IdOnly),
    tok("notequals", Operator, IdOnly),
    tok("lessthan", Operator, IdOnly),
    tok("greaterthan", Operator, IdOnly),
    tok("lessthaneq", Operator, IdOnly),
    tok("greaterthaneq", Operator, IdOnly),
    tok("not", Operator, IdOnly),
    tok("open", Operator, IdOnly),
    tok("close", Operator, IdOnly),
    tok("begin", Operator, IdOnly),
    tok("end", Operator, IdOnly),
    tok("newline", Operator, IdOnly),
    tok("byte", Literal, Memory),
    tok("ubyte", Literal, Memory),
    tok("short", Literal, Memory),
    tok("ushort", Literal, Memory),
    tok("int", Literal, Memory),
    tok("uint", Literal, Memory),
    tok("long", Literal, Memory),
    tok("ulong", Literal, Memory),
    tok("usize", Literal, Memory),
    tok("float", Literal, Memory),
    tok("double", Literal, Memory),
    tok("member", Operator, IdOnly),
    tok("address", Operator, IdOnly),
    tok("next", Operator, IdOnly),
    tok("bracket_open", Operator, IdOnly),
    tok("bracket_close", Operator, IdOnly),
    tok("modulus", Operator, IdOnly),
    tok("generic_int", Literal, IdOnly),
    tok("generic_float", Literal, IdOnly),
    tok("add_assign", Operator, IdOnly),
    tok("subtract_assign", Operator, IdOnly),
    tok("multiply_assign", Operator, IdOnly),
    tok("divide_assign", Operator, IdOnly),
    tok("modulus_assign", Operator, IdOnly),
    tok_named("bit_and_assign", Operator, IdOnly, "bitwise and assign"),
    tok_named("bit_or_assign", Operator, IdOnly, "bitwise or assign"),
    tok_named("bit_xor_assign", Operator, IdOnly, "bitwise xor assign"),
    tok_named("bit_lshift_assign", Operator, IdOnly, "bitwise left shift assign"),
    tok_named("bit_rshift_assign", Operator, IdOnly, "bitwise right shift assign"),
    tok_named("bit_lgc_lshift_assign", Operator, IdOnly, "bitwise logical left shift assign"),
    tok_named("bit_lgc_rshift_assign", Operator, IdOnly, "bitwise logical right shift assign"),
    tok("ellipsis", Operator, IdOnly),
    tok_named("uberand", Operator, IdOnly, "uber and"),
    tok_named("uberor", Operator, IdOnly, "uber or"),
    tok_named("terminate_join", Operator, IdOnly, "terminate join"),
    tok("colon", Operator, IdOnly),
    tok_named("bit_or", Operator, IdOnly, "bitwise or"),
    tok_named("bit_xor", Operator, IdOnly, "bitwise xor"),
    tok_named("bit_lshift", Operator, IdOnly, "bitwise left shift"),
    tok_named("bit_rshift", Operator, IdOnly, "bitwise right shift"),
    tok("bit_complement", Operator, IdOnly),
    tok_named("bit_lgc_lshift", Operator, IdOnly, "bitwise logical left shift"),
    tok_named("bit_lgc_rshift", Operator, IdOnly, "bitwise logical right shift"),
    tok("associate", Operator, IdOnly),
    tok("meta", Preprocessor, CString),
    tok("polymorph", Polymorph, CString),
    tok("maybe", Operator, IdOnly),
    tok("increment", Operator, IdOnly),
    tok("decrement", Operator, IdOnly),
    tok("toggle", Operator, IdOnly),
    tok_named("strong_arrow", Operator, IdOnly, "strong arrow"),
    tok("range", Operator, IdOnly),
    tok("gives", Operator, IdOnly),
    tok("polycount", Literal, CString),
    kw("POD"),
    kw("alias"),
    kw("alignof"),
    kw("and"),
    kw("as"),
    kw("at"),
    kw("break"),
    kw("case"),
    kw("cast"),
    kw("class"),
    kw("const"),
    kw("constructor"),
    kw("continue"),
    kw("def"),
    kw("default"),
    kw("defer"),
    kw("define"),
    kw("delete"),
    kw("each"),
    kw("else"),
    kw("embed"),
    kw("enum"),
    kw("exhaustive"),
    kw("extends"),
    kw("external"),
    kw("fallthrough"),
    kw("false"),
    kw("for"),
    kw("foreign"),
    kw("func"),
    kw("funcptr"),
    kw("global"),
    kw("if"),
    kw("implicit"),
    kw("import"),
    kw("in"),
    kw("inout"),
    kw("llvm_asm"),
    kw("namespace"),
    kw("new"),
    kw("null"),
    kw("or"),
    kw("out"),
    kw("override"),
    kw("packed"),
    kw("pragma"),
    kw("private"),
    kw("public"),
    kw("record"),
    kw("repeat"),
    kw("return"),
    kw("sizeof"),
    kw("static"),
    kw("stdcall"),
    kw("struct"),
    kw("switch"),
    kw("thread_local"),
    kw("true"),
    kw("typeinfo"),
    kw("typenameof"),
    kw("undef"),
    kw("union"),
    kw("unless"),
    kw("until"),
    kw("using"),
    kw("va_arg"),
    kw("va_copy"),
    kw("va_end"),
    kw("va_start"),
    kw("verbatim"),
    kw("virtual"),
    kw("while"),
];

/// Extra names that share an identifier with an existing token.
pub const ALIASES: &[TokenAlias] = &[TokenAlias::new("bit_and", "bitwise and", "address")];
