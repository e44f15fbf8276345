#![allow(clippy::unwrap_used)]
use rstest::rstest;

use super::*;

/// normalize collapses whitespace and strips every std:: occurrence
#[rstest]
#[case("std::string", "string")]
#[case("std::vector<std::pair<std::string, LRUCache>>", "vector<pair<string, LRUCache>>")]
#[case("  unsigned   int ", "unsigned int")]
#[case("const Configuration *", "const Configuration *")]
#[case("", "")]
fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize(raw), expected);
}

/// base_name strips one template level, keywords and trailing decoration
#[rstest]
#[case("vector<pair<string, LRUCache>>", "vector")]
#[case("const std::pair<int, std::string> &", "pair")]
#[case("LRUCache &", "LRUCache")]
#[case("Configuration*", "Configuration")]
#[case("struct Node *", "Node")]
#[case("unsigned long long", "unsigned long long")]
fn test_base_name(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(base_name(raw), expected);
}

/// base_name keeps everything before an unbalanced template bracket
#[test]
fn test_base_name_unbalanced_template() {
    assert_eq!(base_name("vector<pair<string"), "vector");
}

/// lookup_name keeps template arguments so templated strings miss cleanly
#[test]
fn test_lookup_name_keeps_templates() {
    assert_eq!(
        lookup_name("const std::vector<int> &"),
        "vector<int>"
    );
    assert_eq!(lookup_name("Configuration*"), "Configuration");
    assert_eq!(lookup_name("class wd::Configuration"), "wd::Configuration");
}

/// primitive detection covers single- and multi-word forms
#[rstest]
#[case("int", true)]
#[case("unsigned long long", true)]
#[case("bool", true)]
#[case("size_t", false)]
#[case("Configuration", false)]
#[case("", false)]
fn test_is_primitive(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_primitive(name), expected);
}

/// the synthesis gate admits only simple or ::-qualified identifiers
#[rstest]
#[case("Base", true)]
#[case("wd::Base", true)]
#[case("a::b::c", true)]
#[case("_private", true)]
#[case("Singleton<CacheManager>", false)]
#[case("LRUCache &", false)]
#[case("Configuration*", false)]
#[case("wd::", false)]
#[case("", false)]
#[case("9lives", false)]
fn test_is_clean_identifier(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_clean_identifier(name), expected);
}

/// ownership markers are matched in table order, first match wins
#[rstest]
#[case("unique_ptr<Widget>", TypeMarker::OwningPointer)]
#[case("shared_ptr<Widget>", TypeMarker::SharedPointer)]
#[case("weak_ptr<Widget>", TypeMarker::SharedPointer)]
#[case("Widget*", TypeMarker::RawPointer)]
#[case("Widget &", TypeMarker::Reference)]
#[case("Widget", TypeMarker::Value)]
fn test_marker_of(#[case] normalized: &str, #[case] expected: TypeMarker) {
    assert_eq!(marker_of(normalized), expected);
}
