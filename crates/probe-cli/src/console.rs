//! Interactive credential entry on the terminal

use async_trait::async_trait;
use openapi_parser::Endpoint;
use probe_core::{BodyPrompt, CredentialSource};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tracing::{debug, warn};

/// Field names whose values are read without echo
const HIDDEN_FIELD_KEYWORDS: &[&str] = &["password", "senha"];

/// Reads login choices and payloads from stdin
pub struct ConsoleCredentials {
    reader: BufReader<Stdin>,
}

impl ConsoleCredentials {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }

    async fn prompt(text: &str) {
        let mut stdout = tokio::io::stdout();
        if let Err(e) = async {
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await
        }
        .await
        {
            warn!("Could not write prompt: {}", e);
        }
    }

    /// One line without its terminator, `None` at end of input
    async fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!("Could not read from stdin: {}", e);
                None
            }
        }
    }
}

impl Default for ConsoleCredentials {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden_field(field: &str) -> bool {
    let lowered = field.to_lowercase();
    HIDDEN_FIELD_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Interpret typed text for a field; non-string defaults accept JSON literals
fn override_value(input: String, default: &Value) -> Value {
    if default.is_string() {
        return Value::String(input);
    }
    serde_json::from_str(&input).unwrap_or(Value::String(input))
}

#[async_trait]
impl CredentialSource for ConsoleCredentials {
    async fn select_login(&mut self, environment: &str, candidates: &[&Endpoint]) -> Option<usize> {
        let mut listing = format!("Login endpoints found for {}:\n", environment);
        for (i, endpoint) in candidates.iter().enumerate() {
            listing.push_str(&format!("{}. {}\n", i + 1, endpoint));
        }
        listing.push_str("Select the login endpoint: ");
        Self::prompt(&listing).await;

        let line = self.read_line().await?;
        line.trim().parse().ok()
    }

    async fn field_value(&mut self, environment: &str, field: &str, default: &Value) -> Option<Value> {
        if is_hidden_field(field) {
            debug!("Reading {} for {} without echo", field, environment);
            let prompt = format!("[{}] {} (Enter keeps the generated value): ", environment, field);
            return match rpassword::prompt_password(prompt) {
                Ok(value) => Some(Value::String(value)),
                Err(e) => {
                    warn!("Could not read {}: {}", field, e);
                    None
                }
            };
        }

        Self::prompt(&format!("[{}] {} (default: {}): ", environment, field, default))
            .await;
        let line = self.read_line().await?;
        Some(override_value(line, default))
    }

    async fn login_body(&mut self, environment: &str, prompt: &BodyPrompt) -> Option<String> {
        Self::prompt(&format!(
            "[{}] {}\n(finish with an empty line)\n",
            environment, prompt
        ))
        .await;

        let mut lines = Vec::new();
        loop {
            match self.read_line().await {
                Some(line) if line.trim().is_empty() => break,
                Some(line) => lines.push(line),
                None if lines.is_empty() => return None,
                None => break,
            }
        }

        Some(lines.join("\n"))
    }

    fn report(&mut self, message: &str) {
        println!("{}", message);
    }
}
