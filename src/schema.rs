//! スキーマ定義
//!
//! 構造体のフィールドと型、タグ文字列を明示的に宣言する。
//! タグのパース、パラメータの検査、フィールド参照の解決はすべて
//! `SchemaBuilder::build` の時点で行い、不正なら検証前にエラーを返す。

use crate::error::{Error, Result};
use crate::rule::{parse_tags, split_params, Rule, Tag};
use crate::validator::is_known_country;
use crate::value::{Value, ZERO_TIME};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// フィールドの型
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    String,
    Time,
    /// 可変長スライス（要素型）
    Slice(Box<Kind>),
    /// 固定長配列（要素型, 長さ）
    Array(Box<Kind>, usize),
    /// マップ（値の型）
    Map(Box<Kind>),
    /// ネストした構造体
    Struct,
}

impl Kind {
    pub fn slice(elem: Kind) -> Self {
        Kind::Slice(Box::new(elem))
    }

    pub fn array(elem: Kind, len: usize) -> Self {
        Kind::Array(Box::new(elem), len)
    }

    pub fn map(value: Kind) -> Self {
        Kind::Map(Box::new(value))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Kind::Slice(_) | Kind::Array(..) | Kind::Map(_))
    }

    /// 要素型を無視して同じ種類か
    pub fn same_family(&self, other: &Kind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// この型のゼロ値
    pub fn zero_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Uint => Value::Uint(0),
            Kind::Float => Value::Float(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Time => Value::Time(ZERO_TIME),
            Kind::Slice(_) | Kind::Map(_) => Value::Nil,
            Kind::Array(elem, len) => Value::List(vec![elem.zero_value(); *len]),
            Kind::Struct => Value::Record(crate::value::Record::new()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Uint => write!(f, "uint"),
            Kind::Float => write!(f, "float64"),
            Kind::String => write!(f, "string"),
            Kind::Time => write!(f, "time"),
            Kind::Slice(elem) => write!(f, "[]{}", elem),
            Kind::Array(elem, len) => write!(f, "[{}]{}", len, elem),
            Kind::Map(value) => write!(f, "map[string]{}", value),
            Kind::Struct => write!(f, "struct"),
        }
    }
}

/// フィールド定義
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    label: Option<String>,
    kind: Kind,
    optional: bool,
    omit_empty: bool,
    rules: Vec<Rule>,
    nested: Option<Arc<Schema>>,
}

impl FieldSpec {
    /// 構造体上のフィールド名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// メッセージに使う表示名（未設定ならフィールド名）
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// ポインタ相当（未設定ならnil）
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn nested(&self) -> Option<&Schema> {
        self.nested.as_deref()
    }

    /// 型表記（*string, []string等）
    pub fn type_label(&self) -> String {
        if self.optional {
            format!("*{}", self.kind)
        } else {
            self.kind.to_string()
        }
    }

    /// 値が設定されていないときに使うゼロ値
    pub fn zero_value(&self) -> Value {
        if self.optional {
            Value::Nil
        } else {
            self.kind.zero_value()
        }
    }
}

/// 構造体スキーマ
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema {
                name: name.into(),
                fields: Vec::new(),
            },
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 宣言順のフィールド
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// ドット区切りのパスでフィールド定義を解決（ネストした構造体をたどる）
    pub fn resolve(&self, path: &str) -> Option<&FieldSpec> {
        match path.split_once('.') {
            None => self.field(path),
            Some((head, rest)) => self.field(head)?.nested()?.resolve(rest),
        }
    }
}

/// スキーマビルダー
///
/// 最初に発生したエラーを保持し、`build` で返す。
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: Schema,
    error: Option<Error>,
}

impl SchemaBuilder {
    /// フィールドを追加
    pub fn field(self, name: impl Into<String>, kind: Kind, tags: &str) -> Self {
        self.push(name.into(), kind, tags, false, None)
    }

    /// ポインタ相当のフィールドを追加（値がなければnil）
    pub fn optional(self, name: impl Into<String>, kind: Kind, tags: &str) -> Self {
        self.push(name.into(), kind, tags, true, None)
    }

    /// ネストした構造体フィールドを追加
    pub fn nested(self, name: impl Into<String>, schema: Schema) -> Self {
        self.push(name.into(), Kind::Struct, "", false, Some(Arc::new(schema)))
    }

    /// ネストした構造体フィールドをタグ付きで追加
    pub fn nested_with_tags(self, name: impl Into<String>, schema: Schema, tags: &str) -> Self {
        self.push(name.into(), Kind::Struct, tags, false, Some(Arc::new(schema)))
    }

    /// 直前に追加したフィールドの表示名を設定
    pub fn label(mut self, label: impl Into<String>) -> Self {
        if let Some(last) = self.schema.fields.last_mut() {
            last.label = Some(label.into());
        }
        self
    }

    fn push(
        mut self,
        name: String,
        kind: Kind,
        tags: &str,
        optional: bool,
        nested: Option<Arc<Schema>>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        match parse_tags(&name, tags) {
            Ok(parsed) => self.schema.fields.push(FieldSpec {
                name,
                label: None,
                kind,
                optional,
                omit_empty: parsed.omit_empty,
                rules: parsed.rules,
                nested,
            }),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// スキーマを確定
    ///
    /// タグのパラメータと型の組み合わせ、同一構造体内のフィールド参照を検査する。
    pub fn build(self) -> Result<Schema> {
        if let Some(e) = self.error {
            warn!(schema = %self.schema.name, error = %e, "schema rejected");
            return Err(e);
        }
        let schema = self.schema;

        for spec in &schema.fields {
            for rule in &spec.rules {
                check_param(spec, rule)?;
                for path in sibling_paths(rule) {
                    if schema.resolve(&path).is_none() {
                        return Err(Error::UnknownField {
                            schema: schema.name.clone(),
                            path,
                        });
                    }
                }
            }
        }

        Ok(schema)
    }
}

/// 同一構造体から解決するフィールドパス
fn sibling_paths(rule: &Rule) -> Vec<String> {
    match rule.tag {
        t if t.references_sibling() => vec![rule.param.clone()],
        Tag::RequiredIf | Tag::RequiredUnless => {
            rule.params().into_iter().step_by(2).collect()
        }
        Tag::RequiredWith | Tag::RequiredWithout => rule.params().into_vec(),
        _ => Vec::new(),
    }
}

/// タグのパラメータと型の整合性を検査
fn check_param(spec: &FieldSpec, rule: &Rule) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidParam {
        field: spec.name.clone(),
        tag: rule.tag.as_str().to_string(),
        param: rule.param.clone(),
        reason: reason.to_string(),
    };
    let kind = &spec.kind;
    let param = rule.param.as_str();

    match rule.tag {
        Tag::Required => Ok(()),
        Tag::RequiredIf | Tag::RequiredUnless => {
            let words = rule.params();
            if words.is_empty() || words.len() % 2 != 0 {
                return Err(invalid("expected field/value pairs"));
            }
            Ok(())
        }
        Tag::RequiredWith | Tag::RequiredWithout => {
            if rule.params().is_empty() {
                return Err(invalid("expected at least one field"));
            }
            Ok(())
        }

        Tag::Lt | Tag::Lte | Tag::Gt | Tag::Gte if *kind == Kind::Time => {
            if !param.is_empty() {
                return Err(invalid("time comparisons are against the current time"));
            }
            Ok(())
        }
        Tag::Eq | Tag::Ne => match kind {
            Kind::String => Ok(()),
            Kind::Bool => parse_bool(param)
                .map(|_| ())
                .ok_or_else(|| invalid("expected a boolean")),
            k if k.is_collection() => param
                .parse::<usize>()
                .map(|_| ())
                .map_err(|_| invalid("expected an integer length")),
            k if k.is_numeric() => check_number(kind, param).map_err(|_| invalid("expected a number")),
            _ => Err(invalid("unsupported field type")),
        },
        t if t.is_size() => match kind {
            Kind::String => param
                .parse::<usize>()
                .map(|_| ())
                .map_err(|_| invalid("expected an integer length")),
            k if k.is_collection() => param
                .parse::<usize>()
                .map(|_| ())
                .map_err(|_| invalid("expected an integer length")),
            k if k.is_numeric() => check_number(kind, param).map_err(|_| invalid("expected a number")),
            _ => Err(invalid("unsupported field type")),
        },

        t if t.references_sibling() || t.references_top_level() => {
            if param.is_empty() {
                return Err(invalid("expected a field path"));
            }
            Ok(())
        }

        Tag::OneOf => {
            let words = rule.params();
            if words.is_empty() {
                return Err(invalid("expected at least one value"));
            }
            match kind {
                Kind::String => Ok(()),
                Kind::Int => words
                    .iter()
                    .try_for_each(|w| w.parse::<i64>().map(|_| ()))
                    .map_err(|_| invalid("expected integers")),
                Kind::Uint => words
                    .iter()
                    .try_for_each(|w| w.parse::<u64>().map(|_| ()))
                    .map_err(|_| invalid("expected unsigned integers")),
                _ => Err(invalid("unsupported field type")),
            }
        }
        Tag::Unique => {
            if !kind.is_collection() {
                return Err(invalid("unique requires a slice, array or map"));
            }
            Ok(())
        }

        Tag::Numeric | Tag::Latitude | Tag::Longitude => {
            if *kind == Kind::String || kind.is_numeric() {
                Ok(())
            } else {
                Err(invalid("requires a string or numeric field"))
            }
        }
        Tag::Boolean => {
            if matches!(kind, Kind::String | Kind::Bool) {
                Ok(())
            } else {
                Err(invalid("requires a string or bool field"))
            }
        }

        Tag::Contains
        | Tag::ContainsAny
        | Tag::Excludes
        | Tag::ExcludesAll
        | Tag::Datetime => {
            if param.is_empty() {
                return Err(invalid("parameter is required"));
            }
            require_string(kind).map_err(|_| invalid("requires a string field"))
        }
        Tag::PostcodeIso3166Alpha2 => {
            if !is_known_country(param) {
                return Err(invalid("unknown ISO 3166-1 alpha-2 country code"));
            }
            require_string(kind).map_err(|_| invalid("requires a string field"))
        }
        Tag::ExcludesRune => {
            if param.chars().count() != 1 {
                return Err(invalid("expected exactly one character"));
            }
            require_string(kind).map_err(|_| invalid("requires a string field"))
        }

        _ => require_string(kind).map_err(|_| invalid("requires a string field")),
    }
}

fn require_string(kind: &Kind) -> std::result::Result<(), ()> {
    if *kind == Kind::String {
        Ok(())
    } else {
        Err(())
    }
}

fn check_number(kind: &Kind, param: &str) -> std::result::Result<(), ()> {
    let ok = match kind {
        Kind::Int => param.parse::<i64>().is_ok(),
        Kind::Uint => param.parse::<u64>().is_ok(),
        _ => param.parse::<f64>().is_ok(),
    };
    if ok {
        Ok(())
    } else {
        Err(())
    }
}

/// strconv.ParseBool相当の真偽値パース
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// oneofの候補をスキーマ表記どおりに取り出す
pub fn one_of_values(rule: &Rule) -> Vec<String> {
    split_params(&rule.param).into_vec()
}
