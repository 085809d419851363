use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::deck::DeckStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Workflow service settings
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Deck visual defaults
    #[serde(default)]
    pub deck: DeckStyle,

    /// GitHub content store, optional
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Notification channels
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Local directory receiving assembled decks
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Workflow service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkflowConfig {
    // @field: Streaming workflow endpoint
    #[serde(default = "default_workflow_endpoint")]
    pub endpoint: String,

    // @field: API key sent as a Bearer token
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: User identifier reported to the service
    #[serde(default = "default_workflow_user")]
    pub user: String,

    // @field: Request timeout covering the whole stream
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: default_workflow_endpoint(),
            api_key: String::new(),
            user: default_workflow_user(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// GitHub repository receiving contents and decks
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    // @field: Repository owner
    pub owner: String,

    // @field: Repository name
    pub repo: String,

    // @field: Target branch
    #[serde(default = "default_branch")]
    pub branch: String,

    // @field: API token
    #[serde(default = "String::new")]
    pub token: String,

    // @field: Directory for source markdown
    #[serde(default = "default_contents_dir")]
    pub contents_dir: String,

    // @field: Directory for assembled decks
    #[serde(default = "default_slides_dir")]
    pub slides_dir: String,
}

/// Notification channel configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NotificationConfig {
    /// Telegram bot channel
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,

    /// Feishu webhook channel
    #[serde(default)]
    pub feishu: Option<FeishuConfig>,
}

/// Telegram bot credentials
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: String,
    /// Destination chat
    pub chat_id: String,
}

/// Feishu group-bot webhook
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeishuConfig {
    /// Webhook URL
    pub webhook_url: String,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Error
    Error,
    // @level: Warn
    Warn,
    // @level: Info
    #[default]
    Info,
    // @level: Debug
    Debug,
    // @level: Trace
    Trace,
}

fn default_workflow_endpoint() -> String {
    "https://api.dify.ai/v1/workflows/run".to_string()
}

fn default_workflow_user() -> String {
    "slaide".to_string()
}

fn default_timeout_secs() -> u64 {
    500
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_contents_dir() -> String {
    "contents".to_string()
}

fn default_slides_dir() -> String {
    "slides".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("slides")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow: WorkflowConfig::default(),
            deck: DeckStyle::default(),
            store: None,
            notifications: NotificationConfig::default(),
            output_dir: default_output_dir(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.workflow.endpoint)
            .map_err(|err| anyhow!("Invalid workflow endpoint '{}': {}", self.workflow.endpoint, err))?;

        if self.workflow.api_key.is_empty() {
            return Err(anyhow!("Workflow API key is not configured"));
        }

        if let Some(store) = &self.store {
            if store.owner.is_empty() || store.repo.is_empty() {
                return Err(anyhow!("Store configuration requires owner and repo"));
            }
            if store.token.is_empty() {
                return Err(anyhow!("Store configuration requires an API token"));
            }
        }

        Ok(())
    }

    /// Resolve the configuration file path: an existing explicit path wins,
    /// then the user config directory, otherwise the explicit path is the
    /// place a default file will be created
    pub fn resolve_path(cli_path: &str) -> PathBuf {
        let explicit = PathBuf::from(cli_path);
        if explicit.exists() {
            return explicit;
        }
        if let Some(config_dir) = dirs::config_dir() {
            let fallback = config_dir.join("slaide").join("conf.json");
            if fallback.exists() {
                return fallback;
            }
        }
        explicit
    }
}
