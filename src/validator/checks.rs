//! 文字列フォーマットの検査
//!
//! 正規表現は初回使用時に一度だけコンパイルする。

use crate::rule::Tag;
use crate::schema::parse_bool;
use chrono::format::{parse, Parsed, StrftimeItems};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use tracing::trace;

macro_rules! lazy_regex {
    ($($name:ident = $pattern:expr;)*) => {
        $(
            static $name: Lazy<Regex> = Lazy::new(|| Regex::new($pattern).expect("valid regex"));
        )*
    };
}

const BYTE: &str = r"(?:0|[1-9]\d?|1\d\d|2[0-4]\d|25[0-5])";
const PERCENT: &str = r"(?:0|[1-9]\d?|100)%";
const ALPHA_CHANNEL: &str = r"(?:0?\.\d+|[01](?:\.0+)?)";
const HUE: &str = r"(?:0|[1-9]\d?|[12]\d\d|3[0-5]\d|360)";

lazy_regex! {
    ALPHA_RE = r"^[a-zA-Z]+$";
    ALPHANUM_RE = r"^[a-zA-Z0-9]+$";
    NUMERIC_RE = r"^[-+]?[0-9]+(?:\.[0-9]+)?$";
    NUMBER_RE = r"^[0-9]+$";
    HEXADECIMAL_RE = r"^(0[xX])?[0-9a-fA-F]+$";
    HEXCOLOR_RE = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$";
    RGB_RE = &format!(
        r"^rgb\(\s*(?:{b}\s*,\s*{b}\s*,\s*{b}|{p}\s*,\s*{p}\s*,\s*{p})\s*\)$",
        b = BYTE,
        p = PERCENT
    );
    RGBA_RE = &format!(
        r"^rgba\(\s*(?:{b}\s*,\s*{b}\s*,\s*{b}|{p}\s*,\s*{p}\s*,\s*{p})\s*,\s*{a}\s*\)$",
        b = BYTE,
        p = PERCENT,
        a = ALPHA_CHANNEL
    );
    HSL_RE = &format!(r"^hsl\(\s*{h}\s*,\s*{p}\s*,\s*{p}\s*\)$", h = HUE, p = PERCENT);
    HSLA_RE = &format!(
        r"^hsla\(\s*{h}\s*,\s*{p}\s*,\s*{p}\s*,\s*{a}\s*\)$",
        h = HUE,
        p = PERCENT,
        a = ALPHA_CHANNEL
    );
    EMAIL_RE = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
    SCHEME_RE = r"^[a-zA-Z][a-zA-Z0-9+.\-]*:";
    BASE64_RE = r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$";
    ISBN10_RE = r"^(?:[0-9]{9}X|[0-9]{10})$";
    ISBN13_RE = r"^97[89][0-9]{10}$";
    ISSN_RE = r"^[0-9]{4}-[0-9]{3}[0-9X]$";
    UUID_RE = r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";
    UUID3_RE = r"^[0-9a-f]{8}-[0-9a-f]{4}-3[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}$";
    UUID4_RE = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
    UUID5_RE = r"^[0-9a-f]{8}-[0-9a-f]{4}-5[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
    ULID_RE = r"^(?i)[A-HJKMNP-TV-Z0-9]{26}$";
    ASCII_RE = r"^[\x00-\x7F]*$";
    PRINT_ASCII_RE = r"^[\x20-\x7E]*$";
    MULTIBYTE_RE = r"[^\x00-\x7F]";
    DATA_URI_RE = r"^data:(?:\w+/[\w.+\-]+)?(?:;[\w\-]+=[\w.\-]+)*(?:;base64)?$";
    LATITUDE_RE = r"^[-+]?(?:[1-8]?\d(?:\.\d+)?|90(?:\.0+)?)$";
    LONGITUDE_RE = r"^[-+]?(?:180(?:\.0+)?|(?:1[0-7]\d|[1-9]?\d)(?:\.\d+)?)$";
    SSN_RE = r"^[0-9]{3}[ -]?(?:0[1-9]|[1-9][0-9])[ -]?(?:[1-9][0-9]{3}|[0-9][1-9][0-9]{2}|[0-9]{2}[1-9][0-9]|[0-9]{3}[1-9])$";
    JWT_RE = r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$";
}

/// 文字列に対するフォーマット検査
///
/// 文字列フォーマット以外のタグには `None` を返す。
pub fn check_string(tag: Tag, s: &str, param: &str) -> Option<bool> {
    let ok = match tag {
        Tag::Alpha => ALPHA_RE.is_match(s),
        Tag::Alphanum => ALPHANUM_RE.is_match(s),
        Tag::Numeric => NUMERIC_RE.is_match(s),
        Tag::Number => NUMBER_RE.is_match(s),
        Tag::Hexadecimal => HEXADECIMAL_RE.is_match(s),
        Tag::HexColor => HEXCOLOR_RE.is_match(s),
        Tag::Rgb => RGB_RE.is_match(s),
        Tag::Rgba => RGBA_RE.is_match(s),
        Tag::Hsl => HSL_RE.is_match(s),
        Tag::Hsla => HSLA_RE.is_match(s),
        Tag::IsColor => is_color(s),
        Tag::Email => EMAIL_RE.is_match(s),
        Tag::Url => is_url(s),
        Tag::Uri => is_uri(s),
        Tag::Base64 => BASE64_RE.is_match(s),
        Tag::Contains => s.contains(param),
        Tag::ContainsAny => param.chars().any(|c| s.contains(c)),
        Tag::Excludes => !s.contains(param),
        Tag::ExcludesAll => !param.chars().any(|c| s.contains(c)),
        Tag::ExcludesRune => param.chars().next().map_or(true, |c| !s.contains(c)),
        Tag::Isbn => is_isbn10(s) || is_isbn13(s),
        Tag::Isbn10 => is_isbn10(s),
        Tag::Isbn13 => is_isbn13(s),
        Tag::Issn => is_issn(s),
        Tag::Uuid => UUID_RE.is_match(s),
        Tag::Uuid3 => UUID3_RE.is_match(s),
        Tag::Uuid4 => UUID4_RE.is_match(s),
        Tag::Uuid5 => UUID5_RE.is_match(s),
        Tag::Ulid => ULID_RE.is_match(s),
        Tag::Ascii => ASCII_RE.is_match(s),
        Tag::PrintAscii => PRINT_ASCII_RE.is_match(s),
        Tag::Multibyte => s.is_empty() || MULTIBYTE_RE.is_match(s),
        Tag::DataUri => is_data_uri(s),
        Tag::Latitude => LATITUDE_RE.is_match(s),
        Tag::Longitude => LONGITUDE_RE.is_match(s),
        Tag::Ssn => s.len() == 11 && SSN_RE.is_match(s),
        Tag::Json => serde_json::from_str::<serde_json::Value>(s).is_ok(),
        Tag::Jwt => JWT_RE.is_match(s),
        Tag::Lowercase => !s.is_empty() && s == s.to_lowercase(),
        Tag::Uppercase => !s.is_empty() && s == s.to_uppercase(),
        Tag::Boolean => parse_bool(s).is_some(),
        Tag::Datetime => is_datetime(s, param),
        Tag::Image => is_image(Path::new(s)),
        _ => return None,
    };
    Some(ok)
}

fn is_color(s: &str) -> bool {
    HEXCOLOR_RE.is_match(s)
        || RGB_RE.is_match(s)
        || RGBA_RE.is_match(s)
        || HSL_RE.is_match(s)
        || HSLA_RE.is_match(s)
}

/// スキームとホスト（またはフラグメント・不透明部）を持つURL
fn is_url(s: &str) -> bool {
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some(scheme) = SCHEME_RE.find(s) else {
        return false;
    };
    let rest = &s[scheme.end()..];
    if scheme.as_str().eq_ignore_ascii_case("file:") {
        return true;
    }
    let (rest, fragment) = match rest.split_once('#') {
        Some((r, f)) => (r, f),
        None => (rest, ""),
    };
    if let Some(authority) = rest.strip_prefix("//") {
        let host = authority.split(['/', '?']).next().unwrap_or("");
        return !host.is_empty() || !fragment.is_empty();
    }
    // 不透明部（mailto:user@example.com など）
    (!rest.is_empty() && !rest.starts_with('/')) || !fragment.is_empty()
}

/// 絶対URIまたは絶対パス
fn is_uri(s: &str) -> bool {
    let s = s.split_once('#').map_or(s, |(before, _)| before);
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    s.starts_with('/') || SCHEME_RE.is_match(s)
}

fn is_data_uri(s: &str) -> bool {
    match s.split_once(',') {
        Some((header, data)) => DATA_URI_RE.is_match(header) && BASE64_RE.is_match(data),
        None => false,
    }
}

fn strip_isbn_separators(s: &str) -> String {
    s.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

fn is_isbn10(s: &str) -> bool {
    let s = strip_isbn_separators(s);
    if !ISBN10_RE.is_match(&s) {
        return false;
    }
    let sum: u32 = s
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let digit = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
            (10 - i as u32) * digit
        })
        .sum();
    sum % 11 == 0
}

fn is_isbn13(s: &str) -> bool {
    let s = strip_isbn_separators(s);
    if !ISBN13_RE.is_match(&s) {
        return false;
    }
    let sum: u32 = s
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

fn is_issn(s: &str) -> bool {
    if !ISSN_RE.is_match(s) {
        return false;
    }
    let sum: u32 = s
        .chars()
        .filter(|c| *c != '-')
        .enumerate()
        .map(|(i, c)| {
            let digit = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
            (8 - i as u32) * digit
        })
        .sum();
    sum % 11 == 0
}

/// Goの参照時刻レイアウト → strftime書式のキャッシュ
static LAYOUT_CACHE: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

/// Goレイアウトの要素（長いものから照合する）
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("2006", "%Y"),
    ("-07:00", "%:z"),
    ("Z07:00", "%#z"),
    ("-0700", "%z"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    (".999999999", "%.f"),
    ("01", "%m"),
    ("02", "%d"),
    ("_2", "%e"),
    ("15", "%H"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%m"),
    ("2", "%d"),
    ("3", "%I"),
    ("4", "%M"),
    ("5", "%S"),
];

/// Goのレイアウトをchronoの書式へ変換
pub fn go_layout_to_strftime(layout: &str) -> String {
    if let Some(cached) = LAYOUT_CACHE.get(layout) {
        return cached.value().clone();
    }

    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'scan: while let Some(ch) = rest.chars().next() {
        for &(token, spec) in LAYOUT_TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = after;
                continue 'scan;
            }
        }
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    trace!(layout, format = %out, "datetime layout converted");
    LAYOUT_CACHE.insert(layout.to_string(), out.clone());
    out
}

/// Goレイアウトで解釈できる日時文字列か
///
/// 各要素の範囲だけでなく、暦の上で存在する日付・時刻であることも確かめる。
fn is_datetime(s: &str, layout: &str) -> bool {
    let format = go_layout_to_strftime(layout);
    let mut parsed = Parsed::new();
    if parse(&mut parsed, s, StrftimeItems::new(&format)).is_err() {
        return false;
    }

    let has = |specs: &[&str]| specs.iter().any(|spec| format.contains(spec));

    if has(&["%m", "%b", "%B"]) && has(&["%d", "%e"]) {
        // 年のないレイアウトは閏年として扱う（Goは0年）
        if !has(&["%Y", "%y"]) && parsed.set_year(LEAP_YEAR).is_err() {
            return false;
        }
        if parsed.to_naive_date().is_err() {
            return false;
        }
    }

    let has_hour = has(&["%H"]) || (has(&["%I"]) && has(&["%p", "%P"]));
    if has_hour && has(&["%M"]) && parsed.to_naive_time().is_err() {
        return false;
    }
    true
}

const LEAP_YEAR: i64 = 2000;

/// 先頭バイトで画像形式を判定する
const IMAGE_SIGNATURES: &[&[u8]] = &[
    b"\x89PNG\r\n\x1a\n",
    b"\xff\xd8\xff",
    b"GIF87a",
    b"GIF89a",
    b"BM",
    b"II*\x00",
    b"MM\x00*",
    b"\x00\x00\x01\x00",
];

/// 存在する画像ファイルか
fn is_image(path: &Path) -> bool {
    let Ok(mut file) = std::fs::File::open(path) else {
        return false;
    };
    if !file.metadata().map(|m| m.is_file()).unwrap_or(false) {
        return false;
    }
    let mut head = [0u8; 16];
    let Ok(n) = file.read(&mut head) else {
        return false;
    };
    let head = &head[..n];

    // WebP: RIFF....WEBP
    if head.len() >= 12 && &head[..4] == b"RIFF" && &head[8..12] == b"WEBP" {
        return true;
    }
    IMAGE_SIGNATURES.iter().any(|sig| head.starts_with(sig))
}
