//! エラー処理
//!
//! 登録時・スキーマ構築時・翻訳時のエラーを一つの列挙型で表す。
//! 検証失敗（ValidationErrors）はデータであり、ここには含めない。

use std::fmt;

/// エラーコード
///
/// ログや呼び出し側での分類用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 1xxx: テンプレート登録エラー
    E0101, // 重複したテンプレート
    E0102, // 不正なテンプレート
    E0103, // ロケールが持たない複数形ルール
    E0104, // 複数形ルールの不足
    E0105, // 重複した翻訳関数

    // 2xxx: 翻訳時エラー
    E0201, // テンプレート未登録
    E0202, // 翻訳関数未登録

    // 3xxx: スキーマエラー
    E0301, // 未知のタグ
    E0302, // 不正なパラメータ
    E0303, // 未知のフィールド

    // 4xxx: 環境エラー
    E0401, // 未対応のロケール
    E0402, // 設定ファイルエラー
    E0403, // ログ初期化エラー
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// クレート共通エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("translation '{key}' is already registered for locale '{locale}'")]
    DuplicateTemplate { locale: &'static str, key: String },

    #[error("malformed template '{key}': {reason}")]
    MalformedTemplate { key: String, reason: String },

    #[error("plural rule '{rule}' is not supported by locale '{locale}' (key '{key}')")]
    UnsupportedPluralRule {
        locale: &'static str,
        key: String,
        rule: String,
    },

    #[error("cardinal translation '{key}' is missing plural rule '{rule}' for locale '{locale}'")]
    MissingPluralRule {
        locale: &'static str,
        key: String,
        rule: String,
    },

    #[error("translation function for tag '{tag}' is already registered for locale '{locale}'")]
    DuplicateTranslation { locale: &'static str, tag: String },

    #[error("no template '{key}' registered for locale '{locale}'")]
    MissingTemplate { locale: &'static str, key: String },

    #[error("no translation registered for tag '{tag}' in locale '{locale}'")]
    MissingTranslation { locale: &'static str, tag: String },

    #[error("unknown validation tag '{tag}' on field '{field}'{}", suggestion_hint(.suggestion))]
    UnknownTag {
        field: String,
        tag: String,
        suggestion: Option<String>,
    },

    #[error("invalid parameter '{param}' for tag '{tag}' on field '{field}': {reason}")]
    InvalidParam {
        field: String,
        tag: String,
        param: String,
        reason: String,
    },

    #[error("field '{path}' does not exist in '{schema}'")]
    UnknownField { schema: String, path: String },

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging init failed: {0}")]
    Logging(String),
}

impl Error {
    /// エラーコードを取得
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::DuplicateTemplate { .. } => ErrorCode::E0101,
            Error::MalformedTemplate { .. } => ErrorCode::E0102,
            Error::UnsupportedPluralRule { .. } => ErrorCode::E0103,
            Error::MissingPluralRule { .. } => ErrorCode::E0104,
            Error::DuplicateTranslation { .. } => ErrorCode::E0105,
            Error::MissingTemplate { .. } => ErrorCode::E0201,
            Error::MissingTranslation { .. } => ErrorCode::E0202,
            Error::UnknownTag { .. } => ErrorCode::E0301,
            Error::InvalidParam { .. } => ErrorCode::E0302,
            Error::UnknownField { .. } => ErrorCode::E0303,
            Error::UnsupportedLocale(_) => ErrorCode::E0401,
            Error::Config(_) => ErrorCode::E0402,
            Error::Logging(_) => ErrorCode::E0403,
        }
    }

    /// 登録・スキーマ構築時のエラーか（起動を中断すべきもの）
    pub fn is_registration(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::E0101
                | ErrorCode::E0102
                | ErrorCode::E0103
                | ErrorCode::E0104
                | ErrorCode::E0105
                | ErrorCode::E0301
                | ErrorCode::E0302
                | ErrorCode::E0303
        )
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
