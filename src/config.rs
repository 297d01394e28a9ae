//! Configuration management for Folio Server

use serde::Deserialize;
use std::env;

use crate::layout::{PageConfig, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};

/// Default cap on uploaded EPUB size.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // 50 MiB

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub layout: LayoutConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub page_width: usize,
    pub page_height: usize,
    pub margins: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            layout: LayoutConfig {
                page_width: DEFAULT_PAGE_WIDTH,
                page_height: DEFAULT_PAGE_HEIGHT,
                margins: true,
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
        }
    }
}

impl Config {
    /// Build configuration from environment variables. Every value has a
    /// default; unset or unparseable variables fall back rather than fail.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(defaults.server.port),
            },
            layout: LayoutConfig {
                page_width: env::var("PAGE_WIDTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.layout.page_width),
                page_height: env::var("PAGE_HEIGHT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.layout.page_height),
                margins: env::var("PAGE_MARGINS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.layout.margins),
            },
            upload: UploadConfig {
                max_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.upload.max_bytes),
            },
        }
    }
}

impl LayoutConfig {
    /// The page geometry handed to the paginator.
    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            width: self.page_width,
            height: self.page_height,
            margins: self.margins,
        }
    }
}
