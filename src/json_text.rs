//! Token-level handling of the payload text
//!
//! Works on the text itself rather than a parsed tree, so anything valid
//! JSON can express survives untouched: numbers of any size or precision,
//! string escapes (lone surrogates included), key order, duplicate keys and
//! nesting of any depth.

use serde::de::{Deserialize, IgnoredAny};

const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';

/// Syntax check against the JSON grammar only
///
/// No value is built, so numeric range, surrogate pairing and nesting depth
/// do not matter. The skip is iterative, so depth costs no stack.
pub fn check_syntax(text: &str) -> Result<(), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(&mut de)?;
    de.end()
}

/// Compact encoding of already-valid JSON text
///
/// Drops whitespace between tokens and copies every token as written.
pub fn compact(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scan = StringScan::default();

    for c in text.chars() {
        let was_inside = scan.inside;
        scan.feed(c);
        if was_inside || scan.inside || !is_json_whitespace(c) {
            out.push(c);
        }
    }
    out
}

/// Whether the end of `prefix` sits inside a string literal
pub fn ends_inside_string(prefix: &str) -> bool {
    let mut scan = StringScan::default();
    prefix.chars().for_each(|c| scan.feed(c));
    scan.inside
}

/// Replace curly double quotes that delimit strings with straight ones
///
/// `inside_string` is the state at the insertion point. Curly quotes inside
/// a string opened by a straight quote are content and stay as they are.
/// A string opened by a curly quote is closed by the next curly quote.
pub fn straighten_quotes(inserted: &str, inside_string: bool) -> String {
    let mut out = String::with_capacity(inserted.len());
    let mut scan = StringScan {
        inside: inside_string,
        ..StringScan::default()
    };
    let mut curly_opened = false;

    for c in inserted.chars() {
        let curly = c == LEFT_DOUBLE_QUOTE || c == RIGHT_DOUBLE_QUOTE;

        if curly && (!scan.inside || curly_opened) {
            curly_opened = !scan.inside;
            scan.feed('"');
            out.push('"');
            continue;
        }

        scan.feed(c);
        if !scan.inside {
            curly_opened = false;
        }
        out.push(c);
    }
    out
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// String-literal state of a left-to-right scan
#[derive(Debug, Default)]
struct StringScan {
    inside: bool,
    escaped: bool,
}

impl StringScan {
    fn feed(&mut self, c: char) {
        if !self.inside {
            self.inside = c == '"';
        } else if self.escaped {
            self.escaped = false;
        } else if c == '\\' {
            self.escaped = true;
        } else if c == '"' {
            self.inside = false;
        }
    }
}
