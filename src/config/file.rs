//! JSON configuration file
//!
//! Mirrors the option names used by the surrounding tool (`base`, `css`, `rebase`,
//! `assetPaths`, `strict`, `user`, `pass`, `userAgent`, `request`).

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::builder::CriticalConfigBuilder;
use super::types::{CriticalConfig, RebaseDirective, RequestOptions};
use crate::error::{AssetError, AssetResult};

/// `css` accepts a single pattern or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssSetting {
    One(String),
    Many(Vec<String>),
}

/// `rebase` accepts `false`/`true` or an explicit `{from, to}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RebaseSetting {
    Toggle(bool),
    Pair { from: String, to: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestFile {
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub base: Option<String>,
    pub css: Option<CssSetting>,
    pub rebase: Option<RebaseSetting>,
    pub asset_paths: Vec<String>,
    pub strict: Option<bool>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub user_agent: Option<String>,
    pub request: Option<RequestFile>,
}

impl ConfigFile {
    /// Parse a JSON document
    pub fn from_json(json: &str) -> AssetResult<Self> {
        serde_json::from_str(json).map_err(|e| AssetError::Config(format!("invalid JSON: {e}")))
    }

    /// Turn the file into a builder so callers can inject collaborators before `build()`
    pub fn into_builder(self) -> AssetResult<CriticalConfigBuilder> {
        let mut builder = CriticalConfig::builder();

        if let Some(base) = self.base {
            builder = builder.base(base);
        }

        builder = match self.css {
            Some(CssSetting::One(pattern)) => builder.css([pattern]),
            Some(CssSetting::Many(patterns)) => builder.css(patterns),
            None => builder,
        };

        builder = builder.rebase(match self.rebase {
            Some(RebaseSetting::Toggle(false)) => RebaseDirective::Disabled,
            Some(RebaseSetting::Pair { from, to }) => RebaseDirective::Pair { from, to },
            Some(RebaseSetting::Toggle(true)) | None => RebaseDirective::Infer,
        });

        builder = builder
            .asset_paths(self.asset_paths)
            .strict(self.strict.unwrap_or(false));

        if let Some(user) = self.user {
            builder = builder.user(user);
        }
        if let Some(pass) = self.pass {
            builder = builder.pass(pass);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if let Some(request) = self.request {
            let method = request
                .method
                .map(|m| {
                    Method::from_bytes(m.to_uppercase().as_bytes())
                        .map_err(|_| AssetError::Config(format!("invalid request method '{m}'")))
                })
                .transpose()?;

            builder = builder.request(RequestOptions {
                method,
                headers: request.headers.into_iter().collect(),
                timeout: request.timeout_secs.map(Duration::from_secs),
            });
        }

        Ok(builder)
    }
}

impl CriticalConfig {
    /// Build a config from a JSON document using default collaborators
    pub fn from_json(json: &str) -> AssetResult<Self> {
        ConfigFile::from_json(json)?.into_builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "base": "public",
            "css": ["dist/*.css", "https://cdn.test/site.css"],
            "rebase": {"from": "/css/site.css", "to": "/index.html"},
            "assetPaths": ["assets"],
            "strict": true,
            "user": "u",
            "pass": "p",
            "userAgent": "agent",
            "request": {"method": "get", "headers": {"X-Test": "1"}, "timeoutSecs": 5}
        }"#;

        let config = CriticalConfig::from_json(json).unwrap();
        assert_eq!(config.base(), Some("public"));
        assert_eq!(config.css().len(), 2);
        assert_eq!(config.rebase().endpoints(), Some(("/css/site.css", "/index.html")));
        assert_eq!(config.asset_paths(), ["assets".to_string()]);
        assert!(config.strict());
        assert_eq!(config.user_agent(), Some("agent"));
        assert_eq!(config.request().method, Some(Method::GET));
        assert_eq!(config.request().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn rebase_false_disables() {
        let config = CriticalConfig::from_json(r#"{"rebase": false, "css": "a.css"}"#).unwrap();
        assert!(config.rebase().is_disabled());
        assert_eq!(config.css(), ["a.css".to_string()]);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let file = ConfigFile::from_json("{}").unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            ConfigFile::from_json("{not json"),
            Err(AssetError::Config(_))
        ));
    }
}
