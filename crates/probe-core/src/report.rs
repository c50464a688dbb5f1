//! Report output and the comparison report types

use openapi_parser::Endpoint;
use std::fmt;

use crate::compare::LineDiscrepancy;
use crate::executor::RequestResult;

/// Sink for the human-readable run transcript
pub trait Transcript: Send {
    fn write(&mut self, text: &str);
}

/// Transcript kept in memory
#[derive(Debug, Default)]
pub struct MemoryTranscript {
    pub entries: Vec<String>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries joined by newlines
    pub fn contents(&self) -> String {
        self.entries.join("\n")
    }
}

impl Transcript for MemoryTranscript {
    fn write(&mut self, text: &str) {
        self.entries.push(text.to_string());
    }
}

/// One executed endpoint
#[derive(Debug, Clone)]
pub struct Exchange {
    pub endpoint: Endpoint,
    pub result: RequestResult,
}

/// Both executions of one operation whose responses differ
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub endpoint: Endpoint,
    pub left_label: String,
    pub right_label: String,
    pub left: RequestResult,
    pub right: RequestResult,
    pub normalized_left: String,
    pub normalized_right: String,
    pub discrepancies: Vec<LineDiscrepancy>,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method: {}", self.endpoint.method)?;
        writeln!(f, "Path: {}", self.endpoint.path)?;
        writeln!(f, "{} route: {}", self.left_label, self.left.route)?;
        writeln!(f, "{} route: {}", self.right_label, self.right.route)?;
        writeln!(
            f,
            "{} request body: {}",
            self.left_label,
            self.left.request_body.as_deref().unwrap_or("")
        )?;
        writeln!(
            f,
            "{} request body: {}",
            self.right_label,
            self.right.request_body.as_deref().unwrap_or("")
        )?;
        writeln!(f, "{} response:\n{}", self.left_label, self.left.response_info)?;
        writeln!(f, "{} response:\n{}", self.right_label, self.right.response_info)?;
        writeln!(f, "{} normalized:\n{}", self.left_label, self.normalized_left)?;
        writeln!(f, "{} normalized:\n{}", self.right_label, self.normalized_right)?;
        writeln!(f, "Differences:")?;
        for d in &self.discrepancies {
            writeln!(f, "Line {}:", d.line)?;
            writeln!(f, "{}: {}", self.left_label, d.left)?;
            writeln!(f, "{}: {}", self.right_label, d.right)?;
        }
        Ok(())
    }
}

/// Outcome of a two-environment run
#[derive(Debug, Clone, Default)]
pub struct DualReport {
    pub differences: Vec<ComparisonResult>,
    /// Number of operations executed on both sides
    pub compared: usize,
    /// Operations of the first environment with no counterpart in the second
    pub unmatched: Vec<String>,
    pub right_label: String,
}

impl DualReport {
    pub fn is_clean(&self) -> bool {
        self.differences.is_empty()
    }
}

impl fmt::Display for DualReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.unmatched.is_empty() {
            writeln!(f, "Endpoints not found in {}:", self.right_label)?;
            for endpoint in &self.unmatched {
                writeln!(f, "  {}", endpoint)?;
            }
            writeln!(f)?;
        }

        if self.is_clean() {
            return writeln!(f, "No differences found between the endpoints.");
        }

        for (i, difference) in self.differences.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", "-".repeat(60))?;
            }
            write!(f, "{}", difference)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ResponseComparator;
    use openapi_parser::HttpMethod;

    fn result(route: &str, body: &str) -> RequestResult {
        RequestResult {
            route: route.to_string(),
            status: Some(200),
            reason: "OK".to_string(),
            response_body: body.to_string(),
            response_info: format!("Response: Status Code: 200 (OK)\nContent: {}", body),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_report() {
        let report = DualReport {
            compared: 3,
            right_label: "Production".to_string(),
            ..Default::default()
        };
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "No differences found between the endpoints.\n");
    }

    #[test]
    fn test_difference_rendering() {
        let (a, b) = (r#"{"a":1,"b":2}"#, r#"{"a":1,"b":3}"#);
        let (normalized_left, normalized_right) = ResponseComparator::normalize_pair(a, b);
        let comparison = ComparisonResult {
            endpoint: Endpoint::new(HttpMethod::Get, "/items"),
            left_label: "Homolog".to_string(),
            right_label: "Production".to_string(),
            left: result("https://hml/items", a),
            right: result("https://prd/items", b),
            normalized_left,
            normalized_right,
            discrepancies: ResponseComparator::diff(a, b),
        };

        let report = DualReport {
            differences: vec![comparison],
            compared: 1,
            unmatched: vec!["DELETE /items/{id}".to_string()],
            right_label: "Production".to_string(),
        };
        let text = report.to_string();

        assert!(text.contains("Endpoints not found in Production:\n  DELETE /items/{id}"));
        assert!(text.contains("Method: GET\nPath: /items\n"));
        assert!(text.contains("Line 3:\nHomolog:   \"b\": 2\nProduction:   \"b\": 3\n"));
        assert!(text.contains("Homolog normalized:\n{\n  \"a\": 1,\n  \"b\": 2\n}\n"));
        assert!(text.contains("Production normalized:\n{\n  \"a\": 1,\n  \"b\": 3\n}\n"));
        assert!(!text.contains("No differences"));
    }

    #[test]
    fn test_memory_transcript() {
        let mut transcript = MemoryTranscript::new();
        transcript.write("one");
        transcript.write("two");
        assert_eq!(transcript.contents(), "one\ntwo");
    }
}
