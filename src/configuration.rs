use serde_derive::Deserialize;

use crate::flags::FlagDefinition;

#[derive(Clone, Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub flags: Vec<FlagEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlagEntry {
    pub key: String,

    #[serde(flatten)]
    pub definition: FlagDefinition,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputOptions {
    pub directory: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: "generated".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigReadError {
    #[error("failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub fn parse_config(content: &str) -> Result<ExportConfig, ConfigReadError> {
    Ok(toml::from_str::<ExportConfig>(content)?)
}

pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<ExportConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path)?;

    parse_config(&config)
}
