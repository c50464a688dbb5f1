//! Login flow
//!
//! Picks a login endpoint, collects its payload from a [`CredentialSource`]
//! and resubmits until the server answers with a 2xx status or the source
//! gives up. The token found in the successful response is handed back to
//! the caller, never stored globally.

use async_trait::async_trait;
use openapi_parser::Endpoint;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, warn};

use crate::error::{ProbeError, Result};
use crate::executor::RequestExecutor;
use crate::token::{AuthToken, TokenManager};

/// Why a full login payload is being requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPrompt {
    /// The login endpoint declares no body fields
    NoDeclaredFields,
    /// The previous submission was refused
    LoginRejected { status: Option<u16>, reason: String },
    /// The previous input was not a usable JSON object
    InvalidInput(String),
}

impl std::fmt::Display for BodyPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyPrompt::NoDeclaredFields => {
                write!(f, "The login endpoint declares no body fields. Enter the JSON request body:")
            }
            BodyPrompt::LoginRejected { status: Some(status), reason } => write!(
                f,
                "Login failed with status {} ({}). Enter a new JSON request body:",
                status, reason
            ),
            BodyPrompt::LoginRejected { status: None, reason } => {
                write!(f, "Login failed: {}. Enter a new JSON request body:", reason)
            }
            BodyPrompt::InvalidInput(reason) => {
                write!(f, "Invalid JSON ({}). Enter the JSON request body again:", reason)
            }
        }
    }
}

/// Supplies everything the login flow needs from outside: the endpoint pick,
/// field overrides and full payloads.
#[async_trait]
pub trait CredentialSource: Send {
    /// Pick one of `candidates`, 1-based, even when there is only one.
    /// `None` or an out-of-range pick aborts.
    async fn select_login(&mut self, environment: &str, candidates: &[&Endpoint]) -> Option<usize>;

    /// Override for one synthesized body field. `None` or an empty string
    /// keeps `default`.
    async fn field_value(&mut self, environment: &str, field: &str, default: &Value) -> Option<Value>;

    /// Raw JSON text for a full login body. `None` means the user gave up.
    async fn login_body(&mut self, environment: &str, prompt: &BodyPrompt) -> Option<String>;

    /// Status messages for whoever is driving the source
    fn report(&mut self, _message: &str) {}
}

/// States of the login flow
#[derive(Debug, Clone)]
pub enum AuthState {
    NoLoginEndpoint,
    AwaitingCredentials { prompt: BodyPrompt },
    Submitting,
    Retry { status: Option<u16>, reason: String },
    Success { token: Option<AuthToken> },
    Abort { reason: String },
}

/// Result of running the login flow for one environment
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The specification has no login endpoint; requests go out unauthenticated
    NoLoginEndpoint,
    /// The login endpoint answered 2xx; `token` is absent if none was found
    Authenticated {
        endpoint: Endpoint,
        token: Option<AuthToken>,
        attempts: usize,
    },
    Aborted { reason: String },
}

impl AuthOutcome {
    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            AuthOutcome::Authenticated { token, .. } => token.as_ref(),
            _ => None,
        }
    }

    /// Token for the environment, or the abort as an error
    pub fn into_token(self, environment: &str) -> Result<Option<AuthToken>> {
        match self {
            AuthOutcome::NoLoginEndpoint => Ok(None),
            AuthOutcome::Authenticated { token, .. } => Ok(token),
            AuthOutcome::Aborted { reason } => Err(ProbeError::AuthenticationAborted {
                environment: environment.to_string(),
                reason,
            }),
        }
    }
}

/// Drives the login state machine for one environment
pub struct Authenticator<'a, S: CredentialSource + ?Sized> {
    executor: &'a RequestExecutor,
    source: &'a mut S,
}

impl<'a, S: CredentialSource + ?Sized> Authenticator<'a, S> {
    pub fn new(executor: &'a RequestExecutor, source: &'a mut S) -> Self {
        Self { executor, source }
    }

    /// Run the login flow against `base_url` using the login endpoints found
    /// in `endpoints`.
    pub async fn authenticate(
        &mut self,
        environment: &str,
        base_url: &str,
        endpoints: &[Endpoint],
    ) -> AuthOutcome {
        let candidates: Vec<&Endpoint> = endpoints.iter().filter(|e| e.is_login_endpoint).collect();

        let mut login = match self.select(environment, &candidates).await {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => {
                info!("No login endpoint found for {}", environment);
                return AuthOutcome::NoLoginEndpoint;
            }
            Err(reason) => return AuthOutcome::Aborted { reason },
        };

        let mut attempts = 0;
        let mut state = if login.has_body() {
            self.apply_field_overrides(environment, &mut login).await;
            AuthState::Submitting
        } else {
            AuthState::AwaitingCredentials {
                prompt: BodyPrompt::NoDeclaredFields,
            }
        };

        loop {
            debug!("Login state for {}: {:?}", environment, state);

            state = match state {
                AuthState::NoLoginEndpoint => return AuthOutcome::NoLoginEndpoint,

                AuthState::AwaitingCredentials { prompt } => {
                    match self.source.login_body(environment, &prompt).await {
                        None => AuthState::Abort {
                            reason: "no login payload supplied".to_string(),
                        },
                        Some(text) => match parse_login_body(&text) {
                            Ok(body) => {
                                login.request_body = Some(body);
                                AuthState::Submitting
                            }
                            Err(e) => {
                                self.source.report(&e.to_string());
                                AuthState::AwaitingCredentials {
                                    prompt: BodyPrompt::InvalidInput(e.to_string()),
                                }
                            }
                        },
                    }
                }

                AuthState::Submitting => {
                    attempts += 1;
                    let result = self.executor.execute(base_url, &login, None).await;

                    if result.is_success() {
                        let token = TokenManager::extract_token(&result.response_body);
                        AuthState::Success { token }
                    } else if result.status.is_some() {
                        AuthState::Retry {
                            status: result.status,
                            reason: result.reason,
                        }
                    } else {
                        AuthState::Retry {
                            status: None,
                            reason: result.response_info,
                        }
                    }
                }

                AuthState::Retry { status, reason } => {
                    let prompt = BodyPrompt::LoginRejected { status, reason };
                    warn!("{} login attempt {} rejected: {}", environment, attempts, prompt);
                    self.source.report(&prompt.to_string());
                    AuthState::AwaitingCredentials { prompt }
                }

                AuthState::Success { token } => {
                    match &token {
                        Some(_) => info!("Logged in to {} with {}", environment, login),
                        None => {
                            warn!("{} login succeeded but no token was found", environment);
                            self.source
                                .report("Login succeeded but no token was found in the response.");
                        }
                    }
                    return AuthOutcome::Authenticated {
                        endpoint: login,
                        token,
                        attempts,
                    };
                }

                AuthState::Abort { reason } => {
                    warn!("Login for {} aborted: {}", environment, reason);
                    return AuthOutcome::Aborted { reason };
                }
            };
        }
    }

    async fn select(
        &mut self,
        environment: &str,
        candidates: &[&Endpoint],
    ) -> std::result::Result<Option<Endpoint>, String> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let pick = self.source.select_login(environment, candidates).await;
        match pick.and_then(|n| n.checked_sub(1)).and_then(|i| candidates.get(i)) {
            Some(endpoint) => Ok(Some((*endpoint).clone())),
            None => Err(format!("invalid login endpoint selection: {:?}", pick)),
        }
    }

    async fn apply_field_overrides(&mut self, environment: &str, login: &mut Endpoint) {
        let Some(body) = login.request_body.as_mut() else {
            return;
        };

        for (field, value) in body.iter_mut() {
            match self.source.field_value(environment, field, value).await {
                Some(Value::String(s)) if s.is_empty() => {}
                Some(replacement) => *value = replacement,
                None => {}
            }
        }
    }
}

/// Parse a user-supplied login payload; it must be a non-empty JSON object
pub fn parse_login_body(text: &str) -> Result<Map<String, Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProbeError::MalformedInput("empty input".to_string()));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        Ok(Value::Object(_)) => Err(ProbeError::MalformedInput("empty JSON object".to_string())),
        Ok(_) => Err(ProbeError::MalformedInput("expected a JSON object".to_string())),
        Err(e) => Err(ProbeError::MalformedInput(e.to_string())),
    }
}

/// Non-interactive source that replays a fixed script.
///
/// Used for configured login payloads and in tests. Once the scripted bodies
/// run out it returns `None`, which ends the login flow.
#[derive(Debug, Clone)]
pub struct ScriptedCredentials {
    /// 1-based pick among several login candidates
    pub selection: Option<usize>,
    /// Field overrides by name
    pub fields: HashMap<String, Value>,
    /// Full payloads, consumed in order
    pub bodies: VecDeque<String>,
    /// Everything passed to [`CredentialSource::report`]
    pub messages: Vec<String>,
}

impl Default for ScriptedCredentials {
    fn default() -> Self {
        Self {
            selection: Some(1),
            fields: HashMap::new(),
            bodies: VecDeque::new(),
            messages: Vec::new(),
        }
    }
}

impl ScriptedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `body` both as field overrides and as the one full payload
    pub fn from_body(body: Map<String, Value>) -> Self {
        let mut script = Self::new();
        script.bodies.push_back(Value::Object(body.clone()).to_string());
        script.fields = body.into_iter().collect();
        script
    }

    pub fn with_selection(mut self, selection: Option<usize>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.bodies.push_back(body.into());
        self
    }
}

#[async_trait]
impl CredentialSource for ScriptedCredentials {
    async fn select_login(&mut self, _environment: &str, _candidates: &[&Endpoint]) -> Option<usize> {
        self.selection
    }

    async fn field_value(&mut self, _environment: &str, field: &str, _default: &Value) -> Option<Value> {
        self.fields.get(field).cloned()
    }

    async fn login_body(&mut self, _environment: &str, _prompt: &BodyPrompt) -> Option<String> {
        self.bodies.pop_front()
    }

    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
