//! Swagger Probe CLI
//!
//! Runs every operation of an OpenAPI document against the API it describes,
//! or runs two documents side by side and reports where the responses differ.
//! Diagnostics go to stderr; the report goes to stdout and the dated log file.

mod console;
mod transcript;

use clap::Parser;
use fake_data::FakeValueSynthesizer;
use openapi_parser::SchemaWalker;
use probe_core::{
    parse_login_body, CredentialSource, Probe, ProbeSettings, RequestExecutor,
    ScriptedCredentials, Transcript,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

use console::ConsoleCredentials;
use transcript::ConsoleTranscript;

const PRIMARY_LABEL: &str = "Homolog";
const COMPARE_LABEL: &str = "Production";

/// Swagger Probe - exercise and compare APIs described by OpenAPI documents
#[derive(Parser, Debug)]
#[command(name = "swagger-probe")]
#[command(version)]
#[command(about = "Exercise every operation of an OpenAPI document, optionally comparing two environments")]
struct Args {
    /// URL of the OpenAPI/Swagger document (Homolog environment)
    #[arg(env = "SWAGGER_PROBE_SPEC_URL")]
    spec_url: String,

    /// URL of the Production document; enables comparison mode
    #[arg(long, env = "SWAGGER_PROBE_COMPARE_URL")]
    compare: Option<String>,

    /// Settings file (JSON)
    #[arg(long, env = "SWAGGER_PROBE_CONFIG", default_value = "swagger-probe.json")]
    config: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Pause between requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Do not mirror the report to requests-<date>.log
    #[arg(long)]
    no_log_file: bool,

    /// Login payload for the Homolog environment (JSON object)
    #[arg(long, env = "SWAGGER_PROBE_LOGIN_BODY", hide_env_values = true)]
    login_body: Option<String>,

    /// Login payload for the Production environment (JSON object)
    #[arg(long, env = "SWAGGER_PROBE_COMPARE_LOGIN_BODY", hide_env_values = true)]
    compare_login_body: Option<String>,
}

impl Args {
    /// File settings with command-line overrides applied
    fn settings(&self) -> Result<ProbeSettings, Box<dyn std::error::Error>> {
        let mut settings = ProbeSettings::load(&self.config)?;

        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }
        if let Some(delay) = self.delay_ms {
            settings.request_delay_ms = delay;
        }
        if self.no_log_file {
            settings.log_file.enabled = false;
        }
        if let Some(body) = &self.login_body {
            settings.login_body = Some(parse_login_body(body)?);
        }
        if let Some(body) = &self.compare_login_body {
            settings.compare_login_body = Some(parse_login_body(body)?);
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Configured payloads replace the interactive prompts
fn credential_source(login_body: Option<Map<String, Value>>) -> Box<dyn CredentialSource> {
    match login_body {
        Some(body) => Box::new(ScriptedCredentials::from_body(body)),
        None => Box::new(ConsoleCredentials::new()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Keep stdout for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = args.settings()?;

    let executor = RequestExecutor::with_timeout(settings.request_timeout())?;
    let probe = Probe::new(executor).with_delay(settings.request_delay());
    let walker = SchemaWalker::with_synthesizer(
        FakeValueSynthesizer::new().with_max_depth(settings.max_schema_depth),
    );
    let mut transcript = ConsoleTranscript::open(&settings.log_file)?;

    let (homolog, homolog_endpoints) = probe
        .load_environment(PRIMARY_LABEL, &args.spec_url, &walker)
        .await?;

    let Some(compare_url) = &args.compare else {
        let mut source = credential_source(settings.login_body.clone());
        let homolog = probe
            .authenticate(homolog, &homolog_endpoints, source.as_mut())
            .await?;

        let exchanges = probe
            .run_single(&homolog, &homolog_endpoints, &mut transcript)
            .await;
        info!("Finished {} requests", exchanges.len());
        return Ok(());
    };

    let (production, mut production_endpoints) = probe
        .load_environment(COMPARE_LABEL, compare_url, &walker)
        .await?;

    let mut homolog_source = credential_source(settings.login_body.clone());
    let homolog = probe
        .authenticate(homolog, &homolog_endpoints, homolog_source.as_mut())
        .await?;

    let mut production_source = credential_source(settings.compare_login_body.clone());
    let production = probe
        .authenticate(production, &production_endpoints, production_source.as_mut())
        .await?;

    let report = probe
        .run_dual(
            &homolog,
            &homolog_endpoints,
            &production,
            &mut production_endpoints,
            &mut transcript,
        )
        .await;

    transcript.write(&report.to_string());

    if let Some(path) = transcript.log_path() {
        info!("Report appended to {}", path.display());
    }
    Ok(())
}
