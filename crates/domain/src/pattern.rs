// crates/domain/src/pattern.rs
use std::{
    fmt,
    hash::{Hash, Hasher},
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use suite_select_shared_kernel::{DomainError, DomainResult};

/// Separates the class glob from the optional test-name glob.
pub const TEST_SEPARATOR: char = '#';

/// Name pattern over fully-qualified class names, optionally narrowed to
/// test names: `com.example.*Suite` or `com.example.FooSuite#adds*`.
///
/// `*` is the only wildcard and matches any run of characters, dots included.
/// Matching is case-sensitive and purely textual.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuitePattern {
    original: String,
    class: Regex,
    test: Option<Regex>,
}

impl SuitePattern {
    pub fn new(pattern: &str) -> DomainResult<Self> {
        if pattern.is_empty() {
            return Err(invalid(pattern, "pattern is empty"));
        }

        let mut parts = pattern.split(TEST_SEPARATOR);
        let class_part = parts.next().unwrap_or_default();
        let test_part = parts.next();
        if parts.next().is_some() {
            return Err(invalid(pattern, "more than one '#' separator"));
        }

        validate_class_part(pattern, class_part)?;
        if test_part.is_some_and(str::is_empty) {
            return Err(invalid(pattern, "test-name part after '#' is empty"));
        }

        let class = compile(pattern, class_part)?;
        let test = test_part.map(|glob| compile(pattern, glob)).transpose()?;
        Ok(Self { original: pattern.to_string(), class, test })
    }

    /// Class-level match. A test-name restriction never hides the class
    /// itself; it is applied once test names are known.
    pub fn matches_class(&self, class_name: &str) -> bool {
        self.class.is_match(class_name)
    }

    /// Class + test match. Without a test-name part every test of a
    /// matching class matches.
    pub fn matches_test(&self, class_name: &str, test_name: &str) -> bool {
        self.matches_class(class_name) && self.test.as_ref().is_none_or(|test| test.is_match(test_name))
    }

    pub fn has_test_part(&self) -> bool {
        self.test.is_some()
    }

    pub fn class_glob(&self) -> &str {
        self.original.split(TEST_SEPARATOR).next().unwrap_or_default()
    }

    pub fn test_glob(&self) -> Option<&str> {
        self.original.split_once(TEST_SEPARATOR).map(|(_, test)| test)
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

fn invalid(pattern: &str, details: &str) -> DomainError {
    DomainError::InvalidPattern { pattern: pattern.to_string(), details: details.to_string(), source: None }
}

fn validate_class_part(pattern: &str, class_part: &str) -> DomainResult<()> {
    if class_part.is_empty() {
        return Err(invalid(pattern, "class-name part is empty"));
    }
    if let Some(c) = class_part.chars().find(|c| !is_class_char(*c)) {
        let details = if c.is_whitespace() {
            "whitespace is not allowed in a class name".to_string()
        } else {
            format!("unexpected character '{c}' in class name")
        };
        return Err(invalid(pattern, &details));
    }
    if class_part.starts_with('.') || class_part.ends_with('.') {
        return Err(invalid(pattern, "class name cannot start or end with '.'"));
    }
    if class_part.contains("..") {
        return Err(invalid(pattern, "class name contains an empty segment"));
    }
    Ok(())
}

fn is_class_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '*')
}

/// Translate a `*` glob into an anchored regex; every other character is literal.
fn compile(pattern: &str, glob: &str) -> DomainResult<Regex> {
    let mut source = String::with_capacity(glob.len() + 8);
    source.push_str("(?s)^");
    let mut pending_literal = String::new();
    let mut last_was_star = false;
    for c in glob.chars() {
        if c == '*' {
            if !last_was_star {
                source.push_str(&regex::escape(&pending_literal));
                pending_literal.clear();
                source.push_str(".*");
            }
            last_was_star = true;
        } else {
            pending_literal.push(c);
            last_was_star = false;
        }
    }
    source.push_str(&regex::escape(&pending_literal));
    source.push('$');

    Regex::new(&source).map_err(|err| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        details: "cannot compile pattern".to_string(),
        source: Some(Box::new(err)),
    })
}

impl PartialEq for SuitePattern {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for SuitePattern {}

impl Hash for SuitePattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl fmt::Display for SuitePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for SuitePattern {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SuitePattern> for String {
    fn from(pattern: SuitePattern) -> Self {
        pattern.original
    }
}

impl std::str::FromStr for SuitePattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> SuitePattern {
        SuitePattern::new(s).unwrap()
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = pattern("com.example.BarSuite");
        assert!(p.matches_class("com.example.BarSuite"));
        assert!(!p.matches_class("com.example.BarSuite2"));
        assert!(!p.matches_class("xcom.example.BarSuite"));
    }

    #[test]
    fn dot_is_literal() {
        let p = pattern("a.B");
        assert!(!p.matches_class("aXB"));
    }

    #[test]
    fn star_crosses_package_separators() {
        let p = pattern("com.*Suite");
        assert!(p.matches_class("com.example.deep.FooSuite"));
        assert!(p.matches_class("com.Suite"));
        assert!(!p.matches_class("org.example.FooSuite"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!pattern("com.example.*").matches_class("COM.example.Foo"));
    }

    #[test]
    fn dollar_is_literal_for_nested_classes() {
        let p = pattern("a.Outer$Inner");
        assert!(p.matches_class("a.Outer$Inner"));
        assert!(!p.matches_class("a.Outer"));
    }

    #[test]
    fn class_only_pattern_matches_every_test() {
        let p = pattern("a.*");
        assert!(p.matches_test("a.B", "anything at all"));
        assert!(!p.matches_test("b.C", "anything at all"));
    }

    #[test]
    fn test_part_restricts_tests_but_not_class() {
        let p = pattern("a.B#should add*");
        assert!(p.has_test_part());
        assert!(p.matches_class("a.B"));
        assert!(p.matches_test("a.B", "should add numbers"));
        assert!(!p.matches_test("a.B", "should subtract"));
        assert!(!p.matches_test("a.C", "should add numbers"));
        assert_eq!(p.class_glob(), "a.B");
        assert_eq!(p.test_glob(), Some("should add*"));
    }

    #[test]
    fn regex_metacharacters_in_test_names_are_literal() {
        let p = pattern("a.B#sum (1+1)");
        assert!(p.matches_test("a.B", "sum (1+1)"));
        assert!(!p.matches_test("a.B", "sum 11"));
    }

    #[test]
    fn repeated_stars_collapse() {
        assert!(pattern("a.**.C").matches_class("a.x.y.C"));
        assert!(pattern("*").matches_class(""));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for bad in ["", "#test", "a.B#", "a#b#c", "a b", "a.B-C", ".a", "a.", "a..b", "a/b"] {
            let err = SuitePattern::new(bad).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPattern { .. }), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn equality_is_by_original_text() {
        assert_eq!(pattern("a.*"), pattern("a.*"));
        assert_ne!(pattern("a.*"), pattern("a.**"));
    }

    #[test]
    fn serde_revalidates() {
        let json = serde_json::to_string(&pattern("a.*#t")).unwrap();
        assert_eq!(json, "\"a.*#t\"");
        let back: SuitePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern("a.*#t"));
        assert!(serde_json::from_str::<SuitePattern>("\"a..b\"").is_err());
    }
}
