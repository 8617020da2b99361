//! 設定（validator-ko.toml）
//!
//! ```toml
//! [locale]
//! lang = "ko_KR.UTF-8"
//!
//! [log]
//! level = "debug"
//! format = "json"
//!
//! [validator]
//! required_struct_enabled = true
//! parallel_threshold = 128
//! ```
//!
//! すべてのセクションは省略可能で、省略時はデフォルト値になる。

use crate::error::{Error, Result};
use crate::i18n::Locale;
use crate::logging::LogConfig;
use crate::validator::ValidatorConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 設定ファイル名
pub const CONFIG_FILE: &str = "validator-ko.toml";

/// 全体設定
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: LocaleConfig,
    pub log: LogConfig,
    pub validator: ValidatorConfig,
}

/// ロケール設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub lang: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            lang: Locale::default().name().to_string(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}の読み込みに失敗: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// TOML文字列から読み込む
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("{}のパースに失敗: {}", CONFIG_FILE, e)))?;
        config.locale()?;
        Ok(config)
    }

    /// 環境変数から作成（VALIDATOR_KO_LANG > LANG > ko）
    pub fn from_env() -> Result<Self> {
        let locale = Locale::from_env()?;
        Ok(Self {
            locale: LocaleConfig {
                lang: locale.name().to_string(),
            },
            ..Self::default()
        })
    }

    /// 設定されたロケール
    pub fn locale(&self) -> Result<Locale> {
        Locale::parse(&self.locale.lang)
    }
}
