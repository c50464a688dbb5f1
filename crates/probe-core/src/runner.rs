//! Single and dual environment runs

use openapi_parser::{Endpoint, SchemaWalker};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::{Authenticator, CredentialSource};
use crate::compare::ResponseComparator;
use crate::environment::Environment;
use crate::error::{ProbeError, Result};
use crate::executor::{RequestExecutor, RequestResult};
use crate::report::{ComparisonResult, DualReport, Exchange, Transcript};

/// Runs every non-login endpoint of a specification, one request at a time
#[derive(Debug, Clone)]
pub struct Probe {
    executor: RequestExecutor,
    delay: Duration,
}

impl Probe {
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            delay: Duration::ZERO,
        }
    }

    /// Pause for `delay` between consecutive requests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Derive the environment from `spec_url` and walk its document.
    ///
    /// An unusable URL or a document without endpoints ends the run.
    pub async fn load_environment(
        &self,
        label: &str,
        spec_url: &str,
        walker: &SchemaWalker,
    ) -> Result<(Environment, Vec<Endpoint>)> {
        let environment = Environment::from_spec_url(label, spec_url)?;
        let endpoints = walker.fetch_endpoints(spec_url).await;

        if endpoints.is_empty() {
            return Err(ProbeError::NoEndpoints(label.to_string()));
        }

        info!("{}: {} endpoints at {}", label, endpoints.len(), environment.base_url);
        Ok((environment, endpoints))
    }

    /// Log in to `environment` and return it with its token set
    pub async fn authenticate(
        &self,
        environment: Environment,
        endpoints: &[Endpoint],
        source: &mut dyn CredentialSource,
    ) -> Result<Environment> {
        let outcome = Authenticator::new(&self.executor, source)
            .authenticate(&environment.label, &environment.base_url, endpoints)
            .await;

        let token = outcome.into_token(&environment.label)?;
        Ok(environment.with_token(token))
    }

    /// Execute every non-login endpoint in document order, writing each
    /// request and response to `transcript`.
    pub async fn run_single(
        &self,
        environment: &Environment,
        endpoints: &[Endpoint],
        transcript: &mut dyn Transcript,
    ) -> Vec<Exchange> {
        let mut exchanges = Vec::new();

        for endpoint in endpoints.iter().filter(|e| !e.is_login_endpoint) {
            if !exchanges.is_empty() {
                self.pause().await;
            }

            let result = self.send(environment, endpoint).await;
            transcript.write(&format!("{}{}\n", result.request_info, result.response_info));

            exchanges.push(Exchange {
                endpoint: endpoint.clone(),
                result,
            });
        }

        info!("{}: executed {} endpoints", environment.label, exchanges.len());
        exchanges
    }

    /// Execute each non-login endpoint of `left` and its counterpart in
    /// `right` with identical inputs, and collect the differing responses.
    ///
    /// The body and parameters of the left endpoint are copied onto the
    /// right one just before it is sent. Pairs where neither side returned
    /// a body are not reported.
    pub async fn run_dual(
        &self,
        left: &Environment,
        left_endpoints: &[Endpoint],
        right: &Environment,
        right_endpoints: &mut [Endpoint],
        transcript: &mut dyn Transcript,
    ) -> DualReport {
        let mut report = DualReport {
            right_label: right.label.clone(),
            ..Default::default()
        };

        for endpoint in left_endpoints.iter().filter(|e| !e.is_login_endpoint) {
            let Some(counterpart) = right_endpoints
                .iter_mut()
                .find(|e| !e.is_login_endpoint && e.same_operation(endpoint))
            else {
                warn!("{} has no counterpart in {}", endpoint, right.label);
                report.unmatched.push(endpoint.to_string());
                continue;
            };

            counterpart.request_body = endpoint.request_body.clone();
            counterpart.query_parameters = endpoint.query_parameters.clone();

            if report.compared > 0 {
                self.pause().await;
            }
            let left_result = self.send(left, endpoint).await;
            self.pause().await;
            let right_result = self.send(right, counterpart).await;
            report.compared += 1;

            transcript.write(&format!(
                "{}:\n{}{}\n{}:\n{}{}\n",
                left.label,
                left_result.request_info,
                left_result.response_info,
                right.label,
                right_result.request_info,
                right_result.response_info
            ));

            if both_blank(&left_result.response_body, &right_result.response_body) {
                debug!("{} returned no content in either environment", endpoint);
                continue;
            }
            if ResponseComparator::equal(&left_result.response_body, &right_result.response_body) {
                debug!("{} matches across environments", endpoint);
                continue;
            }

            let (normalized_left, normalized_right) = ResponseComparator::normalize_pair(
                &left_result.response_body,
                &right_result.response_body,
            );
            let discrepancies =
                ResponseComparator::diff(&left_result.response_body, &right_result.response_body);

            report.differences.push(ComparisonResult {
                endpoint: endpoint.clone(),
                left_label: left.label.clone(),
                right_label: right.label.clone(),
                left: left_result,
                right: right_result,
                normalized_left,
                normalized_right,
                discrepancies,
            });
        }

        info!(
            "Compared {} endpoints, {} with differences, {} unmatched",
            report.compared,
            report.differences.len(),
            report.unmatched.len()
        );
        report
    }

    async fn send(&self, environment: &Environment, endpoint: &Endpoint) -> RequestResult {
        self.executor
            .execute(&environment.base_url, endpoint, environment.token())
            .await
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Two empty responses (e.g. both 204) have nothing to compare
fn both_blank(left: &str, right: &str) -> bool {
    left.trim().is_empty() && right.trim().is_empty()
}
