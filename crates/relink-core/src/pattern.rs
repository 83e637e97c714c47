//! Glob matching for package names.
//!
//! A deliberately small standalone matcher: `*` and `?` match within a
//! path segment, `**` matches any number of whole segments, everything
//! else is literal. Used for the alwaysRootImport/neverRootImport policy
//! lists, where names are package names like `is-windows` or `@scope/pkg`.

/// Does `name` match at least one pattern in the set?
#[must_use]
pub fn matches_any(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches(name, pattern))
}

/// Does `name` match `pattern`?
#[must_use]
pub fn matches(name: &str, pattern: &str) -> bool {
    let name_segments: Vec<&str> = name.split('/').collect();
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    match_segments(&name_segments, &pattern_segments)
}

fn match_segments(name: &[&str], pattern: &[&str]) -> bool {
    match pattern.first() {
        None => name.is_empty(),
        Some(&"**") => {
            // `**` consumes zero or more whole segments
            if match_segments(name, &pattern[1..]) {
                return true;
            }
            !name.is_empty() && match_segments(&name[1..], pattern)
        }
        Some(first) => {
            !name.is_empty()
                && match_segment(name[0], first)
                && match_segments(&name[1..], &pattern[1..])
        }
    }
}

fn match_segment(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_chars(&name, &pattern)
}

fn match_chars(name: &[char], pattern: &[char]) -> bool {
    match pattern.first() {
        None => name.is_empty(),
        Some('*') => {
            if match_chars(name, &pattern[1..]) {
                return true;
            }
            !name.is_empty() && match_chars(&name[1..], pattern)
        }
        Some('?') => !name.is_empty() && match_chars(&name[1..], &pattern[1..]),
        Some(c) => !name.is_empty() && name[0] == *c && match_chars(&name[1..], &pattern[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        assert!(matches("is-windows", "is-windows"));
        assert!(!matches("is-windows", "is-window"));
        assert!(matches("@scope/pkg", "@scope/pkg"));
    }

    #[test]
    fn test_star_stays_within_segment() {
        assert!(matches("is-windows", "is-*"));
        assert!(matches("@scope/pkg", "@scope/*"));
        // `*` must not cross the scope boundary
        assert!(!matches("@scope/pkg", "*"));
        assert!(!matches("@scope/pkg", "@*"));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        assert!(matches("is-windows", "**"));
        assert!(matches("@scope/pkg", "**"));
        assert!(matches("@scope/pkg", "@scope/**"));
        assert!(matches("@scope/pkg", "**/pkg"));
    }

    #[test]
    fn test_question_mark() {
        assert!(matches("pkg", "pk?"));
        assert!(!matches("pkg", "pkg?"));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["@cfware/*".to_string(), "is-windows".to_string()];
        assert!(matches_any("@cfware/fake-module1", &patterns));
        assert!(matches_any("is-windows", &patterns));
        assert!(!matches_any("path-is-inside", &patterns));
        assert!(!matches_any("anything", &[]));
    }
}
