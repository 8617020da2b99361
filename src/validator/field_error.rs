//! 検証失敗の記録
//!
//! 検証失敗はエラーではなくデータとして返す。翻訳は呼び出し側が
//! `FieldError::translate` で明示的に行う。

use crate::error::{Error, Result};
use crate::i18n::{Locale, Translator};
use crate::rule::Tag;
use crate::schema::Kind;
use crate::value::Value;
use crate::HashMap;
use std::fmt;
use std::sync::Arc;

/// タグごとの翻訳関数
pub type TranslationFn = Arc<dyn Fn(&Translator, &FieldError) -> Result<String> + Send + Sync>;

/// (ロケール, タグ) → 翻訳関数
pub(crate) type TranslationRegistry = HashMap<(Locale, Tag), TranslationFn>;

/// 1フィールドの検証失敗
#[derive(Clone)]
pub struct FieldError {
    pub(crate) namespace: String,
    pub(crate) struct_namespace: String,
    pub(crate) field: String,
    pub(crate) struct_field: String,
    pub(crate) tag: Tag,
    pub(crate) param: String,
    pub(crate) kind: Kind,
    pub(crate) type_label: String,
    pub(crate) value: Value,
    pub(crate) translations: TranslationRegistry,
}

impl FieldError {
    /// 表示名によるパス（`Test.Inner.Code`）
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 構造体上のフィールド名によるパス
    pub fn struct_namespace(&self) -> &str {
        &self.struct_namespace
    }

    /// 表示名
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn struct_field(&self) -> &str {
        &self.struct_field
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// タグ文字列上の名前
    pub fn actual_tag(&self) -> &'static str {
        self.tag.as_str()
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    /// 宣言された型（nilのポインタでも要素の型）
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// 型表記（`*string` など）
    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    /// 検証時の値
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// 翻訳関数を呼び出してメッセージを得る
    ///
    /// 翻訳関数が未登録なら `MissingTranslation`、テンプレートが未登録なら
    /// `MissingTemplate` を返す。
    pub fn translate(&self, trans: &Translator) -> Result<String> {
        let translate = self
            .translations
            .get(&(trans.locale(), self.tag))
            .ok_or_else(|| Error::MissingTranslation {
                locale: trans.locale().name(),
                tag: self.tag.as_str().to_string(),
            })?;
        translate(trans, self)
    }
}

impl fmt::Debug for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldError")
            .field("namespace", &self.namespace)
            .field("tag", &self.tag)
            .field("param", &self.param)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .finish()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.namespace, self.field, self.tag
        )
    }
}

/// 検証失敗の一覧（スキーマの宣言順）
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 名前空間で検索
    pub fn find(&self, namespace: &str) -> Option<&FieldError> {
        self.0.iter().find(|fe| fe.namespace == namespace)
    }

    /// すべて翻訳して (名前空間, メッセージ) の一覧にする
    pub fn translate(&self, trans: &Translator) -> Result<Vec<(String, String)>> {
        self.0
            .iter()
            .map(|fe| Ok((fe.namespace.clone(), fe.translate(trans)?)))
            .collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fe) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", fe)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
