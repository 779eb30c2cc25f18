//! Comment-block extraction from raw header text.
//!
//! Configuration headers associate a doxygen comment with the `#define` it
//! documents in one of three styles:
//!
//! 1. a `/** ... */` block immediately before the define,
//! 2. a `///` line immediately before the define,
//! 3. a trailing `///<` comment after the define on the same line.
//!
//! The three scans run independently and their matches are concatenated in
//! that order; a define documented in two styles therefore shows up twice,
//! and the catalog builder's last-wins merge resolves the duplicate.

use regex::Regex;
use std::sync::LazyLock;

/// A documented `#define` lifted out of a header: the cleaned comment text
/// and the raw `NAME VALUE` fragment that followed (or preceded) it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionBlock {
    pub comment: String,
    pub define: String,
}

static BLOCK_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)/\*\*\s*([^*]*\*(?:[^/*][^*]*\*+)*)/\s*#define\s+((?:[^/]*?/?)+)\s*?(?:/{2,3}[^<].*?)?$",
    )
    .unwrap()
});

static PREFIX_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)/{3}\s*([^<].*?)\s*#define\s+((?:[^/]*?/?)+)\s*?(?:/{2,3}[^<].*?)?$").unwrap()
});

static SUFFIX_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)#define\s*(.*?)\s*/{3}<\s*(.+?)\s*?(?:/{2,3}[^<].*?)?$").unwrap()
});

static BARE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*\*\s*([^*]*\*(?:[^/*][^*]*\*+)*)/").unwrap());

static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\*?\s*(.*?)\s*?(?:/{2}.*?)?$").unwrap());

/// Scan raw header text for documented defines, all three styles.
pub fn definition_blocks(text: &str) -> Vec<DefinitionBlock> {
    let mut blocks = Vec::new();
    for caps in BLOCK_STYLE.captures_iter(text) {
        blocks.push(DefinitionBlock {
            comment: clean_comment(&caps[1]),
            define: caps[2].to_string(),
        });
    }
    for caps in PREFIX_STYLE.captures_iter(text) {
        blocks.push(DefinitionBlock {
            comment: caps[1].to_string(),
            define: caps[2].to_string(),
        });
    }
    // Suffix style captures (define, comment); normalize to the same shape.
    for caps in SUFFIX_STYLE.captures_iter(text) {
        blocks.push(DefinitionBlock {
            comment: caps[2].to_string(),
            define: caps[1].to_string(),
        });
    }
    blocks
}

/// Every `/** ... */` block comment in the text, cleaned, in source order.
/// The module and enum-list builders scan these without requiring an
/// attached define.
pub fn doc_comments(text: &str) -> Vec<String> {
    BARE_BLOCK
        .captures_iter(text)
        .map(|caps| clean_comment(&caps[1]))
        .collect()
}

/// Strip the leading `*` decoration from each line of a block-comment body
/// and rejoin with single spaces. Single-line `/** ... */` bodies leave a
/// trailing `*` in the captured text; strip that too.
fn clean_comment(body: &str) -> String {
    let joined = COMMENT_LINE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect::<Vec<_>>()
        .join(" ");
    joined.trim().trim_end_matches('*').trim_end().to_string()
}
