//! Identifier rules for the declaration target (ES2015 identifiers).
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{ID_Start}$_][\p{ID_Continue}$_\x{200C}\x{200D}]*$").expect("identifier regex")
});

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9$_]").expect("non-word regex"));

/// Keywords, strict-mode reserved words, and the literal names.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// An identifier name that is not a reserved word.
pub fn is_valid_identifier(name: &str) -> bool {
    !is_reserved_word(name) && IDENTIFIER_NAME.is_match(name)
}

/// Turns a field name into something usable as a parameter binding.
///
/// Valid names come back unchanged. Otherwise characters outside
/// `[A-Za-z0-9$_]` act as word breaks (`foo-bar` → `fooBar`), leading digits
/// are dropped, and a reserved result gets a `_` suffix.
pub fn to_binding_identifier_name(name: &str) -> String {
    if is_valid_identifier(name) {
        return name.to_string();
    }

    let dashed = NON_WORD.replace_all(name, "-");
    let trimmed = dashed.trim_start_matches(|c: char| c == '-' || c.is_ascii_digit());

    let mut out = String::with_capacity(trimmed.len());
    let mut upper_next = false;
    for c in trimmed.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    if out.is_empty() {
        return "_".to_string();
    }
    if is_reserved_word(&out) {
        out.push('_');
    }
    out
}
