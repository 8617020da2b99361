//! validator-ko
//!
//! スキーマで宣言したフィールドルールに従ってレコードを検証し、
//! 失敗を韓国語メッセージへ翻訳する。
//!
//! ```no_run
//! use validator_ko::i18n::{ko, Locale, Translator};
//! use validator_ko::{Kind, Record, Schema, Validator};
//!
//! # fn main() -> validator_ko::Result<()> {
//! let mut validator = Validator::new();
//! let mut trans = Translator::new(Locale::Ko);
//! ko::register_default_translations(&mut validator, &mut trans)?;
//!
//! let schema = Schema::builder("User")
//!     .field("Name", Kind::String, "required")
//!     .build()?;
//!
//! if let Err(errs) = validator.validate(&schema, &Record::new()) {
//!     for fe in errs.iter() {
//!         println!("{}", fe.translate(&trans)?); // Name은 필수 필드입니다
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod rule;
pub mod schema;
pub mod validator;
pub mod value;

pub use config::Config;
pub use error::{Error, ErrorCode, Result};
pub use rule::{Rule, Tag};
pub use schema::{FieldSpec, Kind, Schema, SchemaBuilder};
pub use validator::{FieldError, TranslationFn, ValidationErrors, Validator};
pub use value::{Record, Value};

// ========================================
// システム共通型定義
// ========================================

use ahash::RandomState;

/// クレート共通のHashMap型（im::HashMapにahashを適用）
///
/// Recordや翻訳関数テーブルは検証結果ごとに共有されるため、
/// 構造共有でclone()が安価なim::HashMapを使う。
pub type HashMap<K, V> = im::HashMap<K, V, RandomState>;

/// 共通HashMapを作成するヘルパー関数
#[inline]
pub fn new_hashmap<K, V>() -> HashMap<K, V> {
    im::HashMap::with_hasher(RandomState::new())
}
