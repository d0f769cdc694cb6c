// src/harness/ansi.rs
use std::sync::LazyLock;

use regex::bytes::Regex;

// 7-bit and 8-bit C1 escape sequences. Byte-oriented: 0x80..0x9F are matched as raw bytes.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)(?:\x1B[@-Z\\-_]|[\x80-\x9A\x9C-\x9F]|(?:\x1B\[|\x9B)[0-?]*[ -/]*[@-~])")
        .unwrap()
});

/// The text a check sees: stderr then stdout, CRLF folded to LF, escape sequences removed.
pub fn normalize_output(stdout: &[u8], stderr: &[u8]) -> Vec<u8> {
    let mut joined = fold_crlf(stderr);
    joined.extend(fold_crlf(stdout));
    ANSI_ESCAPE.replace_all(&joined, &b""[..]).into_owned()
}

fn fold_crlf(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut it = bytes.iter().copied().peekable();
    while let Some(b) = it.next() {
        if b == b'\r' && it.peek() == Some(&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}
