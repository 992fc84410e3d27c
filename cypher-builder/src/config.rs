// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection settings
//!
//! Settings handed to a `ConnectionProvider` when the caller requests a
//! default-configured connection. Values come from `Default` and can be
//! overridden by `MG_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

pub const ENV_HOST: &str = "MG_HOST";
pub const ENV_PORT: &str = "MG_PORT";
pub const ENV_USERNAME: &str = "MG_USERNAME";
pub const ENV_PASSWORD: &str = "MG_PASSWORD";
pub const ENV_ENCRYPTED: &str = "MG_ENCRYPTED";
pub const ENV_CLIENT_NAME: &str = "MG_CLIENT_NAME";

/// Where and how to connect to the graph backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub encrypted: bool,
    pub client_name: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7687,
            username: String::new(),
            password: String::new(),
            encrypted: false,
            client_name: "cypher-builder".to_string(),
        }
    }
}

impl ConnectionSettings {
    /// Defaults overridden by any `MG_*` variables present in the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(host) = lookup(ENV_HOST) {
            settings.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            settings.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            settings.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            settings.password = password;
        }
        if let Some(encrypted) = lookup(ENV_ENCRYPTED) {
            settings.encrypted = parse_bool(ENV_ENCRYPTED, &encrypted)?;
        }
        if let Some(client_name) = lookup(ENV_CLIENT_NAME) {
            settings.client_name = client_name;
        }

        log::debug!(
            "Connection settings resolved to {} (encrypted: {})",
            settings.address(),
            settings.encrypted
        );
        Ok(settings)
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::Config(format!("{} is not a valid boolean: {}", key, raw))),
    }
}
