//! Type-expression normalization and classification.
//!
//! Pure, total functions over raw C++-style type strings. Normalization is
//! lossy by design: it decides *candidacy* (is this string plausibly a user
//! type worth looking up), never *identity* — identity is the resolver's job
//! via symbol lookup.

/// The foreign standard-library prefix stripped during normalization.
pub const STD_PREFIX: &str = "std::";

/// Single-word built-in primitive type names.
///
/// Multi-word forms like `unsigned long long` are primitives when every word
/// is in this set.
const PRIMITIVES: &[&str] = &[
    "void", "bool", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
];

/// Keywords removed when reducing a type expression to a matchable name.
const STRIPPED_KEYWORDS: &[&str] = &["const", "volatile", "struct", "class"];

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize a raw type expression to its display form.
///
/// Collapses whitespace, strips every `std::` occurrence, and trims. Total:
/// any input yields a best-effort string.
pub fn normalize(raw: &str) -> String {
    let stripped = raw.replace(STD_PREFIX, "");
    collapse_whitespace(&stripped)
}

/// Reduce a type expression to the name used for symbol lookup.
///
/// Like [`normalize`], then strips `const`/`volatile`/`struct`/`class`
/// keywords and trailing pointer/reference decoration. Template arguments are
/// kept: a templated string simply never matches a symbol name, which is the
/// intended miss.
pub fn lookup_name(raw: &str) -> String {
    let normalized = normalize(raw);
    let undecorated = strip_keywords_and_decoration(&normalized);
    collapse_whitespace(&undecorated)
}

/// Extract the base type name used to compute dependency-edge targets.
///
/// Calls [`normalize`], removes one balanced `<...>` template argument list
/// (single level, not recursive), strips keywords and trailing
/// pointer/reference decoration, and collapses whitespace. Never used for
/// primary resolution.
pub fn base_name(raw: &str) -> String {
    let normalized = normalize(raw);
    let detemplated = strip_template_arguments(&normalized);
    let undecorated = strip_keywords_and_decoration(&detemplated);
    collapse_whitespace(&undecorated)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove the first balanced `<...>` span, if any. One pass only.
fn strip_template_arguments(s: &str) -> String {
    let Some(open) = s.find('<') else {
        return s.to_string();
    };
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + i;
                    return format!("{}{}", &s[..open], &s[close + 1..]);
                }
            }
            _ => {}
        }
    }
    // Unbalanced: keep everything before the opening bracket
    s[..open].to_string()
}

fn strip_keywords_and_decoration(s: &str) -> String {
    let without_keywords: Vec<&str> = s
        .split_whitespace()
        .filter(|word| !STRIPPED_KEYWORDS.contains(word))
        .collect();
    without_keywords
        .join(" ")
        .trim_end_matches(['*', '&', ' '])
        .to_string()
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Returns true if `name` is a recognized built-in primitive type name.
///
/// Accepts multi-word forms (`unsigned long long`) where every word is a
/// primitive keyword.
pub fn is_primitive(name: &str) -> bool {
    let mut words = name.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }
    words.into_iter().all(|w| PRIMITIVES.contains(&w))
}

/// Returns true if `name` is a simple or `::`-qualified identifier with no
/// template arguments, no pointer/reference decoration, and no whitespace
/// beyond separators.
///
/// This is the synthesis gate for unresolved base types: only syntactically
/// clean names may become new class symbols.
pub fn is_clean_identifier(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split("::").all(is_simple_identifier)
}

fn is_simple_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

// ============================================================================
// OWNERSHIP MARKERS
// ============================================================================

/// Ownership marker observed in a normalized type string.
///
/// Drives the aggregation-kind decision table in the resolver; the table
/// rows below are literal data, checked in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeMarker {
    /// Unique-ownership smart pointer (`unique_ptr`).
    OwningPointer,
    /// Shared or non-owning smart pointer (`shared_ptr`, `weak_ptr`).
    SharedPointer,
    /// Raw pointer decoration (`*`).
    RawPointer,
    /// Reference decoration (`&`).
    Reference,
    /// Plain value type: none of the markers above.
    Value,
}

/// Substring markers, first match wins.
const MARKER_TABLE: &[(&str, TypeMarker)] = &[
    ("unique_ptr", TypeMarker::OwningPointer),
    ("shared_ptr", TypeMarker::SharedPointer),
    ("weak_ptr", TypeMarker::SharedPointer),
    ("*", TypeMarker::RawPointer),
    ("&", TypeMarker::Reference),
];

/// Classify a normalized type string by its ownership marker.
pub fn marker_of(normalized: &str) -> TypeMarker {
    for (needle, marker) in MARKER_TABLE {
        if normalized.contains(needle) {
            return *marker;
        }
    }
    TypeMarker::Value
}

#[cfg(test)]
mod tests;
