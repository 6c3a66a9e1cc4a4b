//! Identifier casing and root-name validation.
//!
//! The casing transforms split their input into words on every character that
//! is not an ASCII letter or digit, so arbitrary JSON keys (`"first name"`,
//! `"x-request-id"`, `"$ref"`) always come out as plain identifiers. They are
//! total (an input with no words at all becomes `_`) and idempotent.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::NameError;

/// Words that are reserved in at least one of the supported target families
/// (JavaScript/TypeScript, Python, Java/Kotlin, Go, Rust, C/C++).
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // JavaScript / TypeScript
        "break", "case", "catch", "class", "const", "continue", "debugger", "default",
        "delete", "do", "else", "export", "extends", "false", "finally", "for",
        "function", "if", "import", "in", "instanceof", "let", "new", "null",
        "return", "static", "super", "switch", "this", "throw", "true", "try",
        "typeof", "var", "void", "while", "with", "yield", "enum", "await",
        "interface", "type", "public", "private", "protected", "implements",
        // Python
        "def", "lambda", "pass", "raise", "global", "nonlocal", "assert", "from", "as",
        "and", "or", "not", "is", "None", "True", "False", "async", "elif", "except",
        // Java / Kotlin
        "abstract", "boolean", "byte", "char", "double", "final", "float", "int",
        "long", "native", "package", "short", "synchronized", "throws", "transient",
        "volatile", "goto", "strictfp", "sealed", "permits", "record", "val",
        "fun", "object", "when", "companion", "data", "inline", "lateinit", "override",
        // Go
        "chan", "defer", "fallthrough", "go", "map", "range", "select", "struct",
        // Rust
        "crate", "dyn", "extern", "fn", "impl", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "self", "Self", "trait", "unsafe", "use", "where",
        // C / C++
        "auto", "register", "signed", "sizeof", "typedef", "union", "unsigned",
        "asm", "template", "typename", "virtual", "namespace", "using", "operator",
        "friend", "explicit", "mutable", "constexpr", "decltype", "nullptr",
    ]
    .into_iter()
    .collect()
});

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static JS_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

// ------------------------------- Casing ---------------------------------- //

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty())
}

/// Identifiers may not be empty or start with a digit in any target.
fn finish(out: String) -> String {
    match out.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

fn upper_first(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `user_id` → `UserId`, `first name` → `FirstName`, `userID` → `UserID`.
pub fn to_pascal_case(s: &str) -> String {
    finish(words(s).map(upper_first).collect())
}

/// `user_id` → `userId`, `UserName` → `userName`.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    if pascal.starts_with('_') {
        return pascal;
    }
    let mut chars = pascal.chars();
    match chars.next() {
        Some(c) => c.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// `userId` → `user_id`, `HTTPServer` → `http_server`, `x-request-id` → `x_request_id`.
pub fn to_snake_case(s: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for word in words(s) {
        let chars = word.chars().collect::<Vec<_>>();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_ascii_uppercase() {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                let boundary = prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase() && next_lower);
                if boundary && !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            current.push(c.to_ascii_lowercase());
        }
        if !current.is_empty() {
            parts.push(current);
        }
    }
    finish(parts.join("_"))
}

// ----------------------------- Identifiers ------------------------------- //

/// Whether `s` can be used bare as a JavaScript/TypeScript property name.
pub fn is_js_identifier(s: &str) -> bool {
    JS_IDENTIFIER.is_match(s)
}

/// Append `_` to `name` when it collides with one of the target's keywords.
pub fn suffix_if_reserved(name: String, keywords: &[&str]) -> String {
    if keywords.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Validate a root type name supplied by the host. Returns the trimmed name.
///
/// Rules are checked in a fixed order and the first violation is reported:
/// emptiness, leading digit, character set, reserved word (exact or lower-cased).
pub fn validate_type_name(name: &str) -> Result<&str, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(NameError::LeadingDigit);
    }
    if !TYPE_NAME.is_match(trimmed) {
        return Err(NameError::InvalidCharacters);
    }
    if RESERVED_WORDS.contains(trimmed) || RESERVED_WORDS.contains(trimmed.to_lowercase().as_str()) {
        return Err(NameError::Reserved(trimmed.to_string()));
    }
    Ok(trimmed)
}
