//! Configuration for a report run.
//!
//! Three sources, resolved once in `main` into an immutable [`ReportConfig`]:
//! - command-line flags ([`Cli`]),
//! - credentials from the environment ([`Secrets`]),
//! - optional tuning from a TOML settings file ([`Settings`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use weeknote_core::FilterCriteria;
use weeknote_core::hackmd::{DEFAULT_API_URL, DEFAULT_SHARE_BASE_URL};
use weeknote_llm::{ProviderConfig, ProviderKind};

use crate::error::{ReportError, Result};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Generate an annual performance report from HackMD weekly notes.
#[derive(Parser, Debug, Clone)]
#[command(name = "weeknote")]
#[command(version)]
#[command(about = "Generate an annual performance report from HackMD weekly notes")]
pub struct Cli {
    /// Start date in format YYYY-MM-DD
    #[arg(long)]
    pub start_date: String,

    /// End date in format YYYY-MM-DD
    #[arg(long)]
    pub end_date: String,

    /// Target folder name in HackMD
    #[arg(long)]
    pub folder_name: String,

    /// Maximum token limit for the report
    #[arg(long)]
    pub max_tokens: u64,

    /// LLM service provider (openai, gemini, claude)
    #[arg(long, value_parser = parse_provider)]
    pub llm_provider: ProviderKind,

    /// Year tag for HackMD tags
    #[arg(long)]
    pub year_tag: String,

    /// Settings file (TOML)
    #[arg(short, long, env = "WEEKNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the generated report, overriding the settings file
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_provider(s: &str) -> std::result::Result<ProviderKind, String> {
    s.parse::<ProviderKind>().map_err(|_| {
        let names: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Optional settings, loadable from TOML. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Where reports are written.
    #[serde(default)]
    pub output: OutputSettings,
    /// HTTP client behaviour.
    #[serde(default)]
    pub http: HttpSettings,
    /// HackMD-specific settings.
    #[serde(default)]
    pub hackmd: HackMdSettings,
    /// Per-provider endpoint overrides.
    #[serde(default)]
    pub providers: ProviderEndpoints,
    /// Generation parameters.
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a TOML string.
    ///
    /// # Errors
    /// Returns `ReportError::Configuration` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ReportError::Configuration(e.to_string()))
    }

    /// Load settings from a file, or defaults when `path` is `None`.
    ///
    /// # Errors
    /// Returns `ReportError::Configuration` if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Reports directory, created if missing.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
        }
    }
}

/// HTTP settings shared by every outbound call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds. Generation of a long report is slow.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// HackMD settings that are not secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackMdSettings {
    /// Base for share links when the API returns no `publishLink`.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

impl Default for HackMdSettings {
    fn default() -> Self {
        Self {
            share_base_url: default_share_base_url(),
        }
    }
}

/// Endpoint overrides, one optional table per provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// `[providers.openai]`
    #[serde(default)]
    pub openai: Option<EndpointOverride>,
    /// `[providers.gemini]`
    #[serde(default)]
    pub gemini: Option<EndpointOverride>,
    /// `[providers.claude]`
    #[serde(default)]
    pub claude: Option<EndpointOverride>,
}

impl ProviderEndpoints {
    /// Override for `kind`, if any.
    #[must_use]
    pub fn base_url(&self, kind: ProviderKind) -> Option<&str> {
        let entry = match kind {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Gemini => self.gemini.as_ref(),
            ProviderKind::Claude => self.claude.as_ref(),
        };
        entry.map(|e| e.base_url.as_str())
    }
}

/// A single provider endpoint override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointOverride {
    /// Replacement base URL.
    pub base_url: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Output cap for Claude, which requires one.
    #[serde(default = "default_claude_max_output")]
    pub claude_max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            claude_max_output_tokens: default_claude_max_output(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}
fn default_claude_max_output() -> u32 {
    ProviderConfig::DEFAULT_MAX_OUTPUT_TOKENS
}
fn default_log_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Credentials and endpoints read from the environment.
#[derive(Clone)]
pub struct Secrets {
    /// `HACKMD_API_TOKEN`
    pub hackmd_api_token: String,
    /// `HACKMD_API_URL`, defaulted.
    pub hackmd_api_url: String,
    /// `{PROVIDER}_API_KEY`
    pub provider_api_key: String,
    /// `{PROVIDER}_MODEL`
    pub provider_model: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("hackmd_api_token", &"<redacted>")
            .field("hackmd_api_url", &self.hackmd_api_url)
            .field("provider_api_key", &"<redacted>")
            .field("provider_model", &self.provider_model)
            .finish()
    }
}

impl Secrets {
    /// Read and validate the variables needed for `provider`.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`. Blank values count
    /// as missing.
    ///
    /// # Errors
    /// Returns `ReportError::Configuration` naming the first missing variable.
    pub fn from_env<F>(provider: ProviderKind, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hackmd_api_token = get("HACKMD_API_TOKEN").ok_or_else(|| {
            ReportError::Configuration("HACKMD_API_TOKEN is missing in environment variables".into())
        })?;

        let required = |key: String| {
            get(key.as_str()).ok_or_else(|| {
                ReportError::Configuration(format!("{key} is required for {provider} provider"))
            })
        };
        let provider_api_key = required(provider.api_key_var())?;
        let provider_model = required(provider.model_var())?;

        Ok(Self {
            hackmd_api_token,
            hackmd_api_url: get("HACKMD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            provider_api_key,
            provider_model,
        })
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Parameters of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Folder and date range, already validated.
    pub criteria: FilterCriteria,
    /// Token budget across all included notes.
    pub max_tokens: u64,
    /// Tag added to the uploaded report.
    pub year_tag: String,
    /// Where the report file goes.
    pub reports_dir: PathBuf,
}

/// HackMD connection settings.
#[derive(Debug, Clone)]
pub struct HackMdConfig {
    /// API token.
    pub api_token: String,
    /// API base URL.
    pub api_url: String,
    /// Base for share links.
    pub share_base_url: String,
}

/// Everything a run needs, resolved before any network call.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Pipeline parameters.
    pub run: RunOptions,
    /// Notes service.
    pub hackmd: HackMdConfig,
    /// Model provider.
    pub provider: ProviderConfig,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl ReportConfig {
    /// Combine flags, environment and settings, validating all of them.
    ///
    /// # Errors
    /// Returns `ReportError::Configuration` for missing credentials and
    /// `ReportError::Notes` (`InvalidDate`) for malformed dates.
    pub fn resolve<F>(cli: &Cli, settings: &Settings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = Secrets::from_env(cli.llm_provider, lookup)?;
        let criteria = FilterCriteria::new(&cli.folder_name, &cli.start_date, &cli.end_date)?;
        let request_timeout = Duration::from_secs(settings.http.request_timeout_secs);

        let mut provider =
            ProviderConfig::new(cli.llm_provider, secrets.provider_api_key, secrets.provider_model)
                .with_timeout(request_timeout);
        provider.max_output_tokens = settings.generation.claude_max_output_tokens;
        if let Some(url) = settings.providers.base_url(cli.llm_provider) {
            provider = provider.with_base_url(url);
        }

        Ok(Self {
            run: RunOptions {
                criteria,
                max_tokens: cli.max_tokens,
                year_tag: cli.year_tag.clone(),
                reports_dir: cli
                    .reports_dir
                    .clone()
                    .unwrap_or_else(|| settings.output.reports_dir.clone()),
            },
            hackmd: HackMdConfig {
                api_token: secrets.hackmd_api_token,
                api_url: secrets.hackmd_api_url,
                share_base_url: settings.hackmd.share_base_url.clone(),
            },
            provider,
            request_timeout,
        })
    }
}
