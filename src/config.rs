use anyhow::Result;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Root of the backend product API; the uppercased category is appended.
    pub base_url: String,
    /// Token scope requested from the credential provider.
    pub entra_resource: String,
    /// Comma-separated category allow-list.
    pub allowed_categories: String,
}

pub fn load_config() -> Result<GatewayConfig> {
    dotenv().ok();

    let settings = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            File::with_name(&format!(
                "config/{}",
                env::var("ENV").unwrap_or_else(|_| "development".to_string())
            ))
            .required(false),
        )
        .add_source(Environment::with_prefix("GATEWAY").separator("__"))
        .build()?;

    let config: GatewayConfig = settings.try_deserialize()?;
    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &GatewayConfig) -> Result<()> {
    if config.upstream.base_url.is_empty() {
        return Err(anyhow::anyhow!("Upstream base URL cannot be empty"));
    }

    if config.upstream.entra_resource.is_empty() {
        return Err(anyhow::anyhow!("Entra resource scope cannot be empty"));
    }

    Ok(())
}

impl UpstreamConfig {
    /// Parsed allow-list: trimmed, lowercased, empty entries dropped.
    pub fn allowed_categories(&self) -> Vec<String> {
        self.allowed_categories
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:7003/Product".to_string(),
            entra_resource: "api://56b1c593-a584-4622-b223-bcf0fb117cb1/.default".to_string(),
            allowed_categories: "cpu,gpu,cooler,motherboard,ram,psu,case".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}
