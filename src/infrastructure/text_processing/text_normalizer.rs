use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Ligature glyphs commonly produced by PDF text extraction, with their
/// ASCII expansions. Glyphs outside this set pass through unchanged.
const LIGATURES: [(char, &str); 5] = [
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB00}', "ff"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Normalize raw extracted page text for pattern matching: expand ligature
/// glyphs, merge hyphenated line breaks, and collapse runs of whitespace.
/// Total; never fails.
pub fn normalize_extracted_text(raw: &str) -> String {
    let expanded = expand_ligatures(raw);
    let normalized: String = expanded.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut result = String::with_capacity(de_hyphenated.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in de_hyphenated.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prev_was_blank = true;
        } else {
            if !first_content && prev_was_blank {
                result.push_str("\n\n");
            } else if !first_content {
                result.push('\n');
            }
            collapse_internal_whitespace(trimmed, &mut result);
            prev_was_blank = false;
            first_content = false;
        }
    }

    result.trim().to_string()
}

fn expand_ligatures(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match LIGATURES.iter().find(|(glyph, _)| *glyph == ch) {
            Some((_, expansion)) => out.push_str(expansion),
            None => out.push(ch),
        }
    }
    out
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
