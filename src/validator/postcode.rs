//! 国別の郵便番号フォーマット（ISO 3166-1 alpha-2）

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// 国コード → 郵便番号の正規表現
const POSTCODE_PATTERNS: &[(&str, &str)] = &[
    ("AD", r"^AD\d{3}$"),
    ("AM", r"^(?:37)?\d{4}$"),
    ("AR", r"^(?:[A-HJ-NP-Z])?\d{4}(?:[A-Z]{3})?$"),
    ("AT", r"^\d{4}$"),
    ("AU", r"^\d{4}$"),
    ("BE", r"^\d{4}$"),
    ("BG", r"^\d{4}$"),
    ("BR", r"^\d{5}-?\d{3}$"),
    ("CA", r"^[ABCEGHJKLMNPRSTVXY]\d[ABCEGHJ-NPRSTV-Z] ?\d[ABCEGHJ-NPRSTV-Z]\d$"),
    ("CH", r"^\d{4}$"),
    ("CN", r"^\d{6}$"),
    ("CZ", r"^\d{3}\s?\d{2}$"),
    ("DE", r"^\d{5}$"),
    ("DK", r"^\d{4}$"),
    ("ES", r"^\d{5}$"),
    ("FI", r"^\d{5}$"),
    ("FR", r"^\d{2} ?\d{3}$"),
    ("GB", r"^[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}$"),
    ("IN", r"^\d{6}$"),
    ("IT", r"^\d{5}$"),
    ("JP", r"^\d{3}-\d{4}$"),
    ("KR", r"^(?:\d{5}|\d{3}-\d{3})$"),
    ("MX", r"^\d{5}$"),
    ("NL", r"^\d{4} ?[A-Z]{2}$"),
    ("NO", r"^\d{4}$"),
    ("NZ", r"^\d{4}$"),
    ("PL", r"^\d{2}-\d{3}$"),
    ("PT", r"^\d{4}(?:-\d{3})?$"),
    ("RU", r"^\d{6}$"),
    ("SE", r"^\d{3} ?\d{2}$"),
    ("SG", r"^\d{6}$"),
    ("TW", r"^\d{3}(?:\d{2})?$"),
    ("US", r"^\d{5}(?:[ \-]\d{4})?$"),
    ("ZA", r"^\d{4}$"),
];

/// コンパイル済み正規表現のキャッシュ
static POSTCODE_CACHE: Lazy<DashMap<&'static str, Regex>> = Lazy::new(DashMap::new);

/// 国コードに対応する郵便番号の正規表現
fn postcode_regex(country: &str) -> Option<Regex> {
    let &(code, pattern) = POSTCODE_PATTERNS.iter().find(|(c, _)| *c == country)?;
    if let Some(re) = POSTCODE_CACHE.get(code) {
        return Some(re.value().clone());
    }
    match Regex::new(pattern) {
        Ok(re) => {
            POSTCODE_CACHE.insert(code, re.clone());
            Some(re)
        }
        Err(e) => {
            warn!(country = code, error = %e, "invalid postcode pattern");
            None
        }
    }
}

/// 国コードが既知か
pub fn is_known_country(country: &str) -> bool {
    POSTCODE_PATTERNS.iter().any(|(c, _)| *c == country)
}

/// 郵便番号が国の形式に一致するか（未知の国コードは不一致）
pub fn is_postcode(value: &str, country: &str) -> bool {
    postcode_regex(country).is_some_and(|re| re.is_match(value))
}
