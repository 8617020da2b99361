//! ログ初期化
//!
//! ライブラリ内部は `tracing` のイベントを出すだけで、購読者の設定は
//! 呼び出し側が `init` で一度だけ行う。`RUST_LOG` があればそちらを優先する。

use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// ログフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// ログ設定（設定ファイルの `[log]`）
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// フィルタを作成（RUST_LOG > 設定のレベル）
fn build_filter(config: &LogConfig) -> EnvFilter {
    filter_for(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), config.level)
}

/// 指定があればそのディレクティブ、なければレベルだけのフィルタ
fn filter_for(directives: Option<&str>, level: LogLevel) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

/// 購読者を組み立てる（stderr へ出力）
fn build_subscriber(config: &LogConfig, filter: EnvFilter) -> Box<dyn Subscriber + Send + Sync> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.format {
        LogFormat::Text => Box::new(builder.finish()),
        LogFormat::Json => Box::new(builder.json().finish()),
    }
}

/// グローバルな購読者を設定
///
/// 既に設定済みなら `Error::Logging` を返す。
pub fn init(config: &LogConfig) -> Result<()> {
    let subscriber = build_subscriber(config, build_filter(config));
    tracing::subscriber::set_global_default(subscriber).map_err(|e| Error::Logging(e.to_string()))
}
