//! Application configuration.
//!
//! Credentials come from the hosting environment. A missing credential is
//! reported once through `tracing` and left as `None`; resolution itself
//! never fails so the viewer can still start with partial configuration.

use std::collections::HashMap;

use tracing::error;

/// Primary imagery service credential.
pub const PRIMARY_TOKEN_VAR: &str = "ION_ACCESS_TOKEN";
/// Credential for the styled basemap service.
pub const BASEMAP_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";
/// Root of the bundled engine resources (textures, offline tiles).
pub const RESOURCE_BASE_URL: &str = "assets/";

/// A string-valued key lookup: the process environment, values baked in
/// at build time, or a map in tests.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads `std::env` at call time.
#[derive(Debug, Default, Copy, Clone)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Values captured by `option_env!` when the crate was compiled. The
/// browser build has no process environment, so this is its only source.
#[derive(Debug, Default, Copy, Clone)]
pub struct BuildEnv;

impl EnvSource for BuildEnv {
    fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            PRIMARY_TOKEN_VAR => option_env!("ION_ACCESS_TOKEN"),
            BASEMAP_TOKEN_VAR => option_env!("MAPBOX_ACCESS_TOKEN"),
            _ => None,
        };
        value.map(str::to_string)
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub primary_access_token: Option<String>,
    pub basemap_access_token: Option<String>,
    pub resource_base_url: String,
}

impl AppConfig {
    pub fn resolve(env: &impl EnvSource) -> Self {
        Self {
            primary_access_token: lookup_credential(env, PRIMARY_TOKEN_VAR),
            basemap_access_token: lookup_credential(env, BASEMAP_TOKEN_VAR),
            resource_base_url: RESOURCE_BASE_URL.to_string(),
        }
    }

    pub fn from_process_env() -> Self {
        Self::resolve(&ProcessEnv)
    }

    pub fn from_build_env() -> Self {
        Self::resolve(&BuildEnv)
    }

    /// Names of credential variables that did not resolve.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.primary_access_token.is_none() {
            out.push(PRIMARY_TOKEN_VAR);
        }
        if self.basemap_access_token.is_none() {
            out.push(BASEMAP_TOKEN_VAR);
        }
        out
    }

    /// Basemap credential, empty when unset.
    pub fn basemap_token(&self) -> &str {
        self.basemap_access_token.as_deref().unwrap_or_default()
    }
}

fn lookup_credential(env: &impl EnvSource, key: &'static str) -> Option<String> {
    let value = env
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if value.is_none() {
        error!("{key} not found in environment variables");
    }
    value
}

/// Process-wide engine settings applied before any viewer is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub resource_base_url: String,
    pub default_access_token: Option<String>,
}

impl EngineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            resource_base_url: config.resource_base_url.clone(),
            default_access_token: config.primary_access_token.clone(),
        }
    }

    /// Joins `path` onto the resource base with exactly one separator.
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.resource_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            resource_base_url: RESOURCE_BASE_URL.to_string(),
            default_access_token: None,
        }
    }
}
