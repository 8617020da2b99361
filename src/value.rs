//! 検証対象の値
//!
//! リフレクションの代わりに、フィールド名 → 値のRecordで構造体を表現する。
//! 存在しないフィールドはスキーマで宣言した型のゼロ値として扱う。

use crate::error::{Error, Result};
use crate::HashMap;
use chrono::{DateTime, Utc};
use std::fmt;

/// 時刻のゼロ値（未設定の時刻フィールド）
pub const ZERO_TIME: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// 検証対象の値
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// nil（未設定のポインタ・nilスライス・nilマップ）
    Nil,
    /// bool値
    Bool(bool),
    /// 符号付き整数
    Int(i64),
    /// 符号なし整数
    Uint(u64),
    /// 浮動小数点数
    Float(f64),
    /// 文字列
    String(String),
    /// 時刻
    Time(DateTime<Utc>),
    /// スライス・配列
    List(Vec<Value>),
    /// マップ
    Map(HashMap<String, Value>),
    /// ネストした構造体
    Record(Record),
}

impl Value {
    /// nilかどうか
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// ゼロ値かどうか
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Uint(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Time(t) => *t == ZERO_TIME,
            Value::List(items) => items.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::Record(r) => r.is_zero(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 整数として取得（Uint・Floatからの変換も許す）
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Uint(n) => i64::try_from(*n).ok(),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            Value::Int(n) => u64::try_from(*n).ok(),
            Value::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            Value::Uint(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// ネストした構造体として取得（JSON由来のMapも構造体とみなす）
    pub fn as_record(&self) -> Option<Record> {
        match self {
            Value::Record(r) => Some(r.clone()),
            Value::Map(m) => Some(Record { fields: m.clone() }),
            _ => None,
        }
    }

    /// 要素数（nilは0）
    pub fn len(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Map(m) => m.len(),
            Value::String(s) => s.chars().count(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 型名（エラー表示用）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// serde_json::Valueから変換
    ///
    /// オブジェクトはMapになり、構造体フィールドとして参照されたときにRecordとして扱われる。
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut map = crate::new_hashmap();
                for (k, v) in obj {
                    map.insert(k, Value::from_json(v));
                }
                Value::Map(map)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                // 表示順を安定させるためキーでソート
                let mut entries: Vec<_> = m.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                write!(f, "map[")?;
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "]")
            }
            Value::Record(r) => write!(f, "{{{} fields}}", r.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

/// 構造体インスタンス（フィールド名 → 値）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: crate::new_hashmap(),
        }
    }

    /// フィールドを設定して自身を返す（ビルダー形式）
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// すべてのフィールドがゼロ値か
    pub fn is_zero(&self) -> bool {
        self.fields.values().all(Value::is_zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// JSONオブジェクトからRecordを作成
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match Value::from_json(json) {
            Value::Map(fields) => Ok(Self { fields }),
            other => Err(Error::Config(format!(
                "expected a JSON object for a record, got {}",
                other.type_name()
            ))),
        }
    }
}

impl From<HashMap<String, Value>> for Record {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}
