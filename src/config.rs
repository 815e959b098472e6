use anyhow::Result;
use serde::Deserialize;

use crate::speech::Language;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    /// Recognition locale selected at startup.
    pub language: Language,

    /// Milliseconds between audio-level samples.
    pub meter_interval_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Directory the transcript log is persisted under.
    pub path: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
