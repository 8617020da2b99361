//! 検証エンジン
//!
//! スキーマの宣言順にフィールドをたどり、フィールドごとに最初に失敗した
//! ルールを `FieldError` として集める。ネストした構造体は名前空間を
//! `Test.Inner.Code` のように伸ばして再帰的に検証する。

mod checks;
mod compare;
mod field_error;
mod network;
mod postcode;

pub use checks::go_layout_to_strftime;
pub use field_error::{FieldError, TranslationFn, ValidationErrors};
pub(crate) use field_error::TranslationRegistry;
pub use postcode::is_known_country;

use crate::error::{Error, Result};
use crate::i18n::{Locale, Translator};
use crate::rule::{Rule, Tag};
use crate::schema::{one_of_values, parse_bool, FieldSpec, Kind, Schema};
use crate::value::{Record, Value};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, trace};

/// 検証エンジンの設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// 構造体フィールドの required をゼロ値判定で評価する
    pub required_struct_enabled: bool,
    /// validate_many をこの件数以上で並列実行する
    pub parallel_threshold: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required_struct_enabled: false,
            parallel_threshold: 64,
        }
    }
}

/// 検証エンジン
///
/// 翻訳関数の登録は起動時に `&mut self` で行い、以後は `&Validator` を
/// 共有して並行に検証できる。
#[derive(Clone)]
pub struct Validator {
    translations: TranslationRegistry,
    config: ValidatorConfig,
    clock: fn() -> DateTime<Utc>,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            translations: crate::new_hashmap(),
            config,
            clock: Utc::now,
        }
    }

    /// 時刻比較（lt/gt等）に使う現在時刻の取得元を差し替える
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// タグの翻訳を登録
    ///
    /// `register` でテンプレートを翻訳器に追加し、`translate` を
    /// (ロケール, タグ) に対応付ける。どちらかが失敗したら即座に返す。
    pub fn register_translation<F>(
        &mut self,
        tag: Tag,
        trans: &mut Translator,
        register: F,
        translate: TranslationFn,
    ) -> Result<()>
    where
        F: FnOnce(&mut Translator) -> Result<()>,
    {
        let key = (trans.locale(), tag);
        if self.translations.contains_key(&key) {
            return Err(Error::DuplicateTranslation {
                locale: trans.locale().name(),
                tag: tag.as_str().to_string(),
            });
        }
        register(trans)?;
        self.translations.insert(key, translate);
        trace!(locale = %trans.locale(), %tag, "translation registered");
        Ok(())
    }

    /// 翻訳関数が登録済みか
    pub fn has_translation(&self, locale: Locale, tag: Tag) -> bool {
        self.translations.contains_key(&(locale, tag))
    }

    /// レコードを検証
    pub fn validate(
        &self,
        schema: &Schema,
        record: &Record,
    ) -> std::result::Result<(), ValidationErrors> {
        let mut walk = Walk {
            validator: self,
            top_schema: schema,
            top: record,
            now: (self.clock)(),
            errors: Vec::new(),
        };
        walk.walk_struct(schema, record, schema.name(), schema.name());

        debug!(
            schema = schema.name(),
            failures = walk.errors.len(),
            "record validated"
        );
        if walk.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(walk.errors))
        }
    }

    /// 複数のレコードを検証（件数が閾値以上なら並列）
    pub fn validate_many(
        &self,
        schema: &Schema,
        records: &[Record],
    ) -> Vec<std::result::Result<(), ValidationErrors>> {
        if records.len() >= self.config.parallel_threshold {
            debug!(count = records.len(), "validating records in parallel");
            records
                .par_iter()
                .map(|record| self.validate(schema, record))
                .collect()
        } else {
            records
                .iter()
                .map(|record| self.validate(schema, record))
                .collect()
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("translations", &self.translations.len())
            .field("config", &self.config)
            .finish()
    }
}

/// パスで解決したフィールド
struct Resolved<'s> {
    value: Value,
    spec: &'s FieldSpec,
}

/// ドット区切りのパスをスキーマとレコードからたどる
fn lookup<'s>(schema: &'s Schema, record: &Record, path: &str) -> Option<Resolved<'s>> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let spec = schema.field(head)?;
    let value = record
        .get(head)
        .cloned()
        .unwrap_or_else(|| spec.zero_value());
    match rest {
        None => Some(Resolved { value, spec }),
        Some(rest) => lookup(spec.nested()?, &value.as_record()?, rest),
    }
}

/// 1回の検証の状態
struct Walk<'a> {
    validator: &'a Validator,
    top_schema: &'a Schema,
    top: &'a Record,
    now: DateTime<Utc>,
    errors: Vec<FieldError>,
}

impl Walk<'_> {
    fn walk_struct(&mut self, schema: &Schema, record: &Record, ns: &str, struct_ns: &str) {
        for spec in schema.fields() {
            let value = record
                .get(spec.name())
                .cloned()
                .unwrap_or_else(|| spec.zero_value());

            let namespace = format!("{}.{}", ns, spec.display_name());
            let struct_namespace = format!("{}.{}", struct_ns, spec.name());

            if let Some(rule) = self.first_failure(spec, &value, schema, record) {
                trace!(namespace = %namespace, tag = %rule.tag, "field failed");
                self.errors.push(FieldError {
                    namespace,
                    struct_namespace,
                    field: spec.display_name().to_string(),
                    struct_field: spec.name().to_string(),
                    tag: rule.tag,
                    param: rule.param.clone(),
                    kind: spec.kind().clone(),
                    type_label: spec.type_label(),
                    value,
                    translations: self.validator.translations.clone(),
                });
                continue;
            }

            if let (Some(nested), Some(inner)) = (spec.nested(), value.as_record()) {
                self.walk_struct(nested, &inner, &namespace, &struct_namespace);
            }
        }
    }

    /// 最初に失敗したルール
    fn first_failure<'r>(
        &self,
        spec: &'r FieldSpec,
        value: &Value,
        parent_schema: &Schema,
        parent: &Record,
    ) -> Option<&'r Rule> {
        let rules = spec.rules();
        let first = rules.first()?;

        if spec.omit_empty() && !self.has_value(spec, value) {
            return None;
        }

        // nilのポインタは存在チェック以外のルールを評価できない
        let nil_pointer = spec.is_optional() && value.is_nil();
        if nil_pointer && !first.tag.runs_when_nil() {
            return Some(first);
        }

        rules.iter().find(|rule| {
            let ok = if rule.tag.runs_when_nil() {
                self.check_presence(rule, spec, value, parent_schema, parent)
            } else if nil_pointer {
                false
            } else {
                self.check_rule(rule, spec, value, parent_schema, parent)
            };
            !ok
        })
    }

    /// 値が設定されているか（requiredの判定）
    fn has_value(&self, spec: &FieldSpec, value: &Value) -> bool {
        if spec.is_optional() {
            return !value.is_nil();
        }
        match spec.kind() {
            Kind::Slice(_) | Kind::Map(_) => !value.is_nil(),
            Kind::Array(..) => match value {
                Value::List(items) => items.iter().any(|v| !v.is_zero()),
                other => !other.is_zero(),
            },
            Kind::Struct => !self.validator.config.required_struct_enabled || !value.is_zero(),
            _ => !value.is_zero(),
        }
    }

    fn check_presence(
        &self,
        rule: &Rule,
        spec: &FieldSpec,
        value: &Value,
        parent_schema: &Schema,
        parent: &Record,
    ) -> bool {
        let params = rule.params();
        let sibling_present = |path: &String| {
            lookup(parent_schema, parent, path).is_some_and(|r| self.has_value(r.spec, &r.value))
        };
        let pair_matches = |pair: &[String]| match pair {
            [path, expected] => lookup(parent_schema, parent, path)
                .is_some_and(|r| matches_param(r.spec, &r.value, expected)),
            _ => false,
        };

        let required = match rule.tag {
            Tag::Required => true,
            Tag::RequiredIf => params.chunks(2).all(pair_matches),
            Tag::RequiredUnless => !params.chunks(2).any(pair_matches),
            Tag::RequiredWith => params.iter().any(sibling_present),
            Tag::RequiredWithout => !params.iter().all(sibling_present),
            _ => false,
        };
        !required || self.has_value(spec, value)
    }

    fn check_rule(
        &self,
        rule: &Rule,
        spec: &FieldSpec,
        value: &Value,
        parent_schema: &Schema,
        parent: &Record,
    ) -> bool {
        let kind = spec.kind();
        let param = rule.param.as_str();

        match rule.tag {
            tag if tag.is_size() => compare::check_size(tag, kind, value, param, self.now),

            Tag::PostcodeIso3166Alpha2 => value
                .as_str()
                .is_some_and(|s| postcode::is_postcode(s, param)),
            Tag::PostcodeIso3166Alpha2Field => {
                let country = lookup(parent_schema, parent, param);
                match (value.as_str(), country.as_ref().and_then(|c| c.value.as_str())) {
                    (Some(s), Some(country)) => postcode::is_postcode(s, country),
                    _ => false,
                }
            }
            tag if tag.references_sibling() => {
                let other = lookup(parent_schema, parent, param);
                compare::check_field(
                    tag,
                    (value, kind),
                    other.as_ref().map(|r| (&r.value, r.spec.kind())),
                )
            }
            tag if tag.references_top_level() => {
                let other = lookup(self.top_schema, self.top, param);
                compare::check_field(
                    tag,
                    (value, kind),
                    other.as_ref().map(|r| (&r.value, r.spec.kind())),
                )
            }

            Tag::OneOf => one_of(kind, value, rule),
            Tag::Unique => is_unique(value),

            Tag::Numeric if kind.is_numeric() => true,
            Tag::Latitude | Tag::Longitude if kind.is_numeric() => {
                checks::check_string(rule.tag, &value.to_string(), param).unwrap_or(false)
            }
            Tag::Boolean if *kind == Kind::Bool => true,

            tag => match value.as_str() {
                Some(s) => checks::check_string(tag, s, param)
                    .or_else(|| network::check_network(tag, s))
                    .unwrap_or(false),
                None => false,
            },
        }
    }
}

/// required_if / required_unless の値照合
fn matches_param(spec: &FieldSpec, value: &Value, expected: &str) -> bool {
    if value.is_nil() && !spec.kind().is_collection() {
        return expected == "nil";
    }
    match spec.kind() {
        Kind::String => value.as_str() == Some(expected),
        Kind::Int => value.as_i64() == expected.parse().ok(),
        Kind::Uint => value.as_u64() == expected.parse().ok(),
        Kind::Float => value.as_f64() == expected.parse().ok(),
        Kind::Bool => value.as_bool() == parse_bool(expected),
        k if k.is_collection() => expected.parse::<usize>().ok() == Some(value.len()),
        _ => false,
    }
}

fn one_of(kind: &Kind, value: &Value, rule: &Rule) -> bool {
    let allowed = one_of_values(rule);
    match kind {
        Kind::String => value
            .as_str()
            .is_some_and(|s| allowed.iter().any(|a| a == s)),
        Kind::Int => value
            .as_i64()
            .is_some_and(|n| allowed.iter().any(|a| a.parse::<i64>() == Ok(n))),
        Kind::Uint => value
            .as_u64()
            .is_some_and(|n| allowed.iter().any(|a| a.parse::<u64>() == Ok(n))),
        _ => false,
    }
}

/// 要素（マップは値）に重複がないか
fn is_unique(value: &Value) -> bool {
    let items: Vec<&Value> = match value {
        Value::Nil => return true,
        Value::List(items) => items.iter().collect(),
        Value::Map(map) => map.values().collect(),
        _ => return false,
    };
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| a != b))
}
