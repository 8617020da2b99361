use super::josa::push_with_particles;
use super::locale::{Locale, PluralRule};
use crate::error::{Error, Result};
use crate::HashMap;
use tracing::trace;

/// テンプレートの構成要素
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Arg(usize),
}

/// 登録時にパース済みのテンプレート
#[derive(Debug, Clone)]
struct Template {
    segments: Vec<Segment>,
    arity: usize,
}

impl Template {
    /// `{0}`, `{1}` ... を含むテンプレートをパース
    ///
    /// 閉じていない `{`、数字以外のプレースホルダー、番号の欠けはエラー
    fn parse(key: &str, text: &str) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedTemplate {
            key: key.to_string(),
            reason,
        };
        if text.is_empty() {
            return Err(malformed("template is empty".to_string()));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars();

        while let Some(ch) = chars.next() {
            if ch != '{' {
                literal.push(ch);
                continue;
            }
            let mut digits = String::new();
            let mut closed = false;
            for d in chars.by_ref() {
                if d == '}' {
                    closed = true;
                    break;
                }
                digits.push(d);
            }
            if !closed {
                return Err(malformed(format!("unclosed placeholder '{{{}'", digits)));
            }
            let index = digits
                .parse::<usize>()
                .map_err(|_| malformed(format!("placeholder '{{{}}}' is not a number", digits)))?;
            if !literal.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Arg(index));
        }
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }

        let mut used: Vec<usize> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg(i) => Some(*i),
                Segment::Text(_) => None,
            })
            .collect();
        used.sort_unstable();
        used.dedup();
        if let Some(missing) = used.iter().enumerate().find(|(i, n)| i != *n).map(|(i, _)| i) {
            return Err(malformed(format!("placeholder {{{}}} is missing", missing)));
        }

        Ok(Self {
            segments,
            arity: used.len(),
        })
    }

    /// パラメータを埋め込む（不足分は空文字）
    ///
    /// 助詞はテンプレート本文の中だけで確定させ、パラメータはそのまま残す。
    fn render(&self, params: &[&str]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(s) => push_with_particles(&mut out, s),
                Segment::Arg(i) => out.push_str(params.get(*i).copied().unwrap_or("")),
            }
        }
        out
    }
}

/// 1つのロケールに束縛されたテンプレート表
///
/// 起動時に登録し、以後は `&Translator` として共有して読み取るだけにする。
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    templates: HashMap<String, Template>,
    cardinals: HashMap<String, HashMap<PluralRule, Template>>,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            templates: crate::new_hashmap(),
            cardinals: crate::new_hashmap(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// テンプレートを登録
    pub fn add(&mut self, key: &str, text: &str, override_existing: bool) -> Result<()> {
        if !override_existing && self.templates.contains_key(key) {
            return Err(Error::DuplicateTemplate {
                locale: self.locale.name(),
                key: key.to_string(),
            });
        }
        let template = Template::parse(key, text)?;
        trace!(locale = %self.locale, key, "template registered");
        self.templates.insert(key.to_string(), template);
        Ok(())
    }

    /// 基数の複数形テンプレートを登録（`{0}` に整形済みの数値が入る）
    pub fn add_cardinal(
        &mut self,
        key: &str,
        text: &str,
        rule: PluralRule,
        override_existing: bool,
    ) -> Result<()> {
        if !self.locale.cardinal_rules().contains(&rule) {
            return Err(Error::UnsupportedPluralRule {
                locale: self.locale.name(),
                key: key.to_string(),
                rule: rule.to_string(),
            });
        }

        let template = Template::parse(key, text)?;
        if template.arity != 1 {
            return Err(Error::MalformedTemplate {
                key: key.to_string(),
                reason: "cardinal template must use exactly {0}".to_string(),
            });
        }

        let mut rules = self.cardinals.get(key).cloned().unwrap_or_default();
        if !override_existing && rules.contains_key(&rule) {
            return Err(Error::DuplicateTemplate {
                locale: self.locale.name(),
                key: key.to_string(),
            });
        }
        rules.insert(rule, template);
        trace!(locale = %self.locale, key, %rule, "cardinal template registered");
        self.cardinals.insert(key.to_string(), rules);
        Ok(())
    }

    /// テンプレートを展開し、助詞を確定させる
    pub fn t(&self, key: &str, params: &[&str]) -> Result<String> {
        let template = self.templates.get(key).ok_or_else(|| Error::MissingTemplate {
            locale: self.locale.name(),
            key: key.to_string(),
        })?;
        Ok(template.render(params))
    }

    /// 数値に応じた複数形テンプレートを展開
    pub fn c(&self, key: &str, num: f64, digits: usize, param: &str) -> Result<String> {
        let rules = self.cardinals.get(key).ok_or_else(|| Error::MissingTemplate {
            locale: self.locale.name(),
            key: key.to_string(),
        })?;
        let rule = self.locale.cardinal_rule(num, digits);
        let template = rules.get(&rule).ok_or_else(|| Error::MissingPluralRule {
            locale: self.locale.name(),
            key: key.to_string(),
            rule: rule.to_string(),
        })?;
        Ok(template.render(&[param]))
    }

    /// ロケールの桁区切りで数値を整形
    pub fn fmt_number(&self, num: f64, digits: usize) -> String {
        self.locale.fmt_number(num, digits)
    }

    /// 登録済みか
    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key) || self.cardinals.contains_key(key)
    }

    /// 登録済みのキー数
    pub fn len(&self) -> usize {
        self.templates.len() + self.cardinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// すべての複数形テンプレートがロケールのルールを満たしているか
    pub fn verify(&self) -> Result<()> {
        for (key, rules) in self.cardinals.iter() {
            for rule in self.locale.cardinal_rules() {
                if !rules.contains_key(rule) {
                    return Err(Error::MissingPluralRule {
                        locale: self.locale.name(),
                        key: key.clone(),
                        rule: rule.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
