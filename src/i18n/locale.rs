use crate::error::{Error, Result};
use std::fmt;

/// ロケール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ko,
}

impl Locale {
    /// 環境変数からロケールを取得
    /// 優先順位: VALIDATOR_KO_LANG > LANG > デフォルト(ko)
    pub fn from_env() -> Result<Self> {
        if let Ok(lang) = std::env::var("VALIDATOR_KO_LANG") {
            return Self::parse(&lang);
        }

        // LANGは他言語のことが多いので、解釈できなければデフォルトにする
        if let Ok(lang) = std::env::var("LANG") {
            if let Ok(locale) = Self::parse(&lang) {
                return Ok(locale);
            }
        }

        Ok(Locale::Ko)
    }

    /// ロケール文字列をパース（ko, ko_KR, ko-KR.UTF-8 など）
    pub fn parse(code: &str) -> Result<Self> {
        let lang = code
            .split(['_', '-', '.'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "ko" => Ok(Locale::Ko),
            _ => Err(Error::UnsupportedLocale(code.to_string())),
        }
    }

    /// ロケール名
    pub const fn name(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
        }
    }

    /// このロケールが区別する基数の複数形ルール
    pub fn cardinal_rules(self) -> &'static [PluralRule] {
        match self {
            Locale::Ko => &[PluralRule::Other],
        }
    }

    /// 数値に対応する基数の複数形ルール（韓国語は常にOther）
    pub fn cardinal_rule(self, _num: f64, _digits: usize) -> PluralRule {
        match self {
            Locale::Ko => PluralRule::Other,
        }
    }

    /// 数値を桁区切り付きで整形（1113.0, 2 → "1,113.00"）
    pub fn fmt_number(self, num: f64, digits: usize) -> String {
        let (group, decimal) = match self {
            Locale::Ko => (',', '.'),
        };

        let raw = format!("{:.*}", digits, num.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (raw.as_str(), None),
        };

        let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
        let is_zero = raw.bytes().all(|b| b == b'0' || b == b'.');
        if num.is_sign_negative() && !is_zero {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(group);
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push(decimal);
            out.push_str(frac);
        }
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 複数形ルール（CLDRの分類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluralRule::Zero => "zero",
            PluralRule::One => "one",
            PluralRule::Two => "two",
            PluralRule::Few => "few",
            PluralRule::Many => "many",
            PluralRule::Other => "other",
        };
        f.write_str(name)
    }
}

/// パラメータ文字列の小数点以下の桁数（"1113.00" → 2）
pub fn param_precision(param: &str) -> usize {
    param.split_once('.').map_or(0, |(_, frac)| frac.len())
}
