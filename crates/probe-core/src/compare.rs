//! Canonical JSON comparison of two response bodies

use serde_json::Value;

/// One line that differs between two normalized bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiscrepancy {
    /// 1-based line number
    pub line: usize,
    pub left: String,
    pub right: String,
}

/// Compares response bodies after re-serializing them with fixed indentation
pub struct ResponseComparator;

impl ResponseComparator {
    /// Pretty-printed form of a JSON body, `None` if it is not JSON.
    /// Property order and number text are kept as received.
    pub fn canonicalize(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }

    /// Bodies are equal when their canonical forms match. Blank bodies are
    /// never equal; if either side is not JSON the trimmed texts are compared.
    pub fn equal(left: &str, right: &str) -> bool {
        if left.trim().is_empty() || right.trim().is_empty() {
            return false;
        }

        let (left, right) = Self::normalize_pair(left, right);
        left == right
    }

    /// Both canonical forms when both sides are JSON, otherwise both trimmed texts
    pub fn normalize_pair(left: &str, right: &str) -> (String, String) {
        match (Self::canonicalize(left), Self::canonicalize(right)) {
            (Some(left), Some(right)) => (left, right),
            _ => (left.trim().to_string(), right.trim().to_string()),
        }
    }

    /// Positional line diff of the normalized bodies.
    ///
    /// Lines are paired by index up to the longer side; a missing line is
    /// empty. No alignment is attempted, so one inserted line shifts every
    /// line after it. Two blank bodies yield a single line-1 entry since
    /// they are never equal.
    pub fn diff(left: &str, right: &str) -> Vec<LineDiscrepancy> {
        if left.trim().is_empty() && right.trim().is_empty() {
            return vec![LineDiscrepancy {
                line: 1,
                left: String::new(),
                right: String::new(),
            }];
        }

        let (left, right) = Self::normalize_pair(left, right);
        let left_lines: Vec<&str> = left.split('\n').collect();
        let right_lines: Vec<&str> = right.split('\n').collect();
        let len = left_lines.len().max(right_lines.len());

        (0..len)
            .filter_map(|i| {
                let l = left_lines.get(i).copied().unwrap_or_default();
                let r = right_lines.get(i).copied().unwrap_or_default();
                (l != r).then(|| LineDiscrepancy {
                    line: i + 1,
                    left: l.to_string(),
                    right: r.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ignores_whitespace() {
        assert!(ResponseComparator::equal(r#"{"a":1}"#, "{\n  \"a\": 1\n}"));
        assert!(ResponseComparator::equal("[1, 2,3]", "[1,2,3]"));
        assert!(ResponseComparator::diff(r#"{"a":1}"#, "{\n  \"a\": 1\n}").is_empty());
    }

    #[test]
    fn test_blank_bodies_never_equal() {
        assert!(!ResponseComparator::equal("", ""));
        assert!(!ResponseComparator::equal("  ", r#"{"a":1}"#));
        assert_eq!(ResponseComparator::diff("", "  ").len(), 1);
        assert_eq!(ResponseComparator::diff("", r#"{"a":1}"#)[0].line, 1);
    }

    #[test]
    fn test_non_json_falls_back_to_trimmed_text() {
        assert!(ResponseComparator::equal("  OK\n", "OK"));
        assert!(!ResponseComparator::equal("OK", "ok"));
        assert!(!ResponseComparator::equal("1", " not json"));
        assert!(ResponseComparator::diff("  OK\n", "OK").is_empty());
    }

    #[test]
    fn test_single_changed_value() {
        let diff = ResponseComparator::diff(r#"{"a":1,"b":2}"#, r#"{"a":1,"b":3}"#);

        assert_eq!(
            diff,
            vec![LineDiscrepancy {
                line: 3,
                left: "  \"b\": 2".to_string(),
                right: "  \"b\": 3".to_string(),
            }]
        );
    }

    #[test]
    fn test_numbers_keep_their_text() {
        let (a, b) = (
            r#"{"id": 12345678901234567890123}"#,
            r#"{"id": 12345678901234567890124}"#,
        );
        assert!(!ResponseComparator::equal(a, b));
        assert_eq!(
            ResponseComparator::canonicalize(a).unwrap(),
            "{\n  \"id\": 12345678901234567890123\n}"
        );
        assert_eq!(ResponseComparator::diff(a, b).len(), 1);

        assert!(!ResponseComparator::equal(r#"{"v": 0.10000000000000000001}"#, r#"{"v": 0.1}"#));
    }

    #[test]
    fn test_positional_cascade() {
        let diff = ResponseComparator::diff(r#"{"a":1,"b":2}"#, r#"{"x":0,"a":1,"b":2}"#);

        // every line after the insertion is reported
        let lines: Vec<usize> = diff.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
        assert_eq!(diff.last().unwrap().left, "");
        assert_eq!(diff.last().unwrap().right, "}");
    }

    #[test]
    fn test_diff_empty_iff_equal() {
        let samples = [
            r#"{"a":1}"#,
            r#"{"a": 1}"#,
            r#"{"a":[1,2]}"#,
            "plain",
            " plain ",
            "",
            "[]",
            "a\r\nb",
            "a\nb",
        ];

        for left in samples {
            for right in samples {
                assert_eq!(
                    ResponseComparator::diff(left, right).is_empty(),
                    ResponseComparator::equal(left, right),
                    "{:?} vs {:?}",
                    left,
                    right
                );
            }
        }
    }
}
