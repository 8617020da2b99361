//! 韓国語の検証メッセージ
//!
//! タグごとにテンプレートと翻訳関数を登録する。テンプレート中の
//! `은(는)` などの助詞は展開時に直前の語に合わせて確定する。

use super::locale::{param_precision, PluralRule};
use super::translator::Translator;
use crate::error::Result;
use crate::rule::Tag;
use crate::schema::Kind;
use crate::validator::{FieldError, TranslationFn, Validator};
use std::sync::Arc;
use tracing::debug;

/// フィールド名だけを埋め込むタグ
const FIELD_ONLY: &[(Tag, &str)] = &[
    (Tag::Required, "{0}은(는) 필수 필드입니다"),
    (Tag::RequiredIf, "{0}은(는) 필수 필드입니다"),
    (Tag::RequiredUnless, "{0}은(는) 필수 필드입니다"),
    (Tag::RequiredWith, "{0}은(는) 필수 필드입니다"),
    (Tag::RequiredWithout, "{0}은(는) 필수 필드입니다"),
    (Tag::Alpha, "{0}은(는) 알파벳만을 포함할 수 있습니다"),
    (Tag::Alphanum, "{0}은(는) 알파벳과 숫자만을 포함할 수 있습니다"),
    (Tag::Numeric, "{0}은(는) 올바른 숫자여야 합니다"),
    (Tag::Number, "{0}은(는) 올바른 숫자여야 합니다"),
    (Tag::Hexadecimal, "{0}은(는) 올바른 16진수 표기여야 합니다"),
    (Tag::HexColor, "{0}은(는) 올바른 HEX 색상 코드여야 합니다"),
    (Tag::Rgb, "{0}은(는) 올바른 RGB 색상 코드여야 합니다"),
    (Tag::Rgba, "{0}은(는) 올바른 RGBA 색상 코드여야 합니다"),
    (Tag::Hsl, "{0}은(는) 올바른 HSL 색상 코드여야 합니다"),
    (Tag::Hsla, "{0}은(는) 올바른 HSLA 색상 코드여야 합니다"),
    (Tag::IsColor, "{0}은(는) 올바른 색이어야 합니다"),
    (Tag::Email, "{0}은(는) 올바른 이메일 주소여야 합니다"),
    (Tag::Url, "{0}은(는) 올바른 URL이어야 합니다"),
    (Tag::Uri, "{0}은(는) 올바른 URI이어야 합니다"),
    (Tag::Base64, "{0}은(는) 올바른 Base64 문자열이어야 합니다"),
    (Tag::Isbn, "{0}은(는) 올바른 ISBN 번호여야 합니다"),
    (Tag::Isbn10, "{0}은(는) 올바른 ISBN-10 번호여야 합니다"),
    (Tag::Isbn13, "{0}은(는) 올바른 ISBN-13 번호여야 합니다"),
    (Tag::Issn, "{0}은(는) 올바른 ISSN 번호여야 합니다"),
    (Tag::Uuid, "{0}은(는) 올바른 UUID여야 합니다"),
    (Tag::Uuid3, "{0}은(는) 버전 3의 올바른 UUID여야 합니다"),
    (Tag::Uuid4, "{0}은(는) 버전 4의 올바른 UUID여야 합니다"),
    (Tag::Uuid5, "{0}은(는) 버전 5의 올바른 UUID여야 합니다"),
    (Tag::Ulid, "{0}은(는) 올바른 ULID여야 합니다"),
    (Tag::Ascii, "{0}은(는) ASCII 문자만을 포함해야 합니다"),
    (Tag::PrintAscii, "{0}은(는) 인쇄 가능한 ASCII 문자만을 포함해야 합니다"),
    (Tag::Multibyte, "{0}은(는) 멀티바이트 문자를 포함해야 합니다"),
    (Tag::DataUri, "{0}은(는) 올바른 데이터 URI를 포함해야 합니다"),
    (Tag::Latitude, "{0}은(는) 올바른 위도 좌표를 포함해야 합니다"),
    (Tag::Longitude, "{0}은(는) 올바른 경도 좌표를 포함해야 합니다"),
    (Tag::Ssn, "{0}은(는) 올바른 사회 보장 번호여야 합니다"),
    (Tag::Ip, "{0}은(는) 올바른 IP 주소여야 합니다"),
    (Tag::Ipv4, "{0}은(는) 올바른 IPv4 주소여야 합니다"),
    (Tag::Ipv6, "{0}은(는) 올바른 IPv6 주소여야 합니다"),
    (Tag::Cidr, "{0}은(는) 올바른 CIDR 표기를 포함해야 합니다"),
    (Tag::Cidrv4, "{0}은(는) IPv4 주소의 올바른 CIDR 표기를 포함해야 합니다"),
    (Tag::Cidrv6, "{0}은(는) IPv6 주소의 올바른 CIDR 표기를 포함해야 합니다"),
    (Tag::TcpAddr, "{0}은(는) 올바른 TCP 주소여야 합니다"),
    (Tag::Tcp4Addr, "{0}은(는) 올바른 IPv4의 TCP 주소여야 합니다"),
    (Tag::Tcp6Addr, "{0}은(는) 올바른 IPv6의 TCP 주소여야 합니다"),
    (Tag::UdpAddr, "{0}은(는) 올바른 UDP 주소여야 합니다"),
    (Tag::Udp4Addr, "{0}은(는) 올바른 IPv4의 UDP 주소여야 합니다"),
    (Tag::Udp6Addr, "{0}은(는) 올바른 IPv6의 UDP 주소여야 합니다"),
    (Tag::IpAddr, "{0}은(는) 해석 가능한 IP 주소여야 합니다"),
    (Tag::Ip4Addr, "{0}은(는) 해석 가능한 IPv4 주소여야 합니다"),
    (Tag::Ip6Addr, "{0}은(는) 해석 가능한 IPv6 주소여야 합니다"),
    (Tag::UnixAddr, "{0}은(는) 해석 가능한 UNIX 주소여야 합니다"),
    (Tag::Mac, "{0}은(는) 올바른 MAC 주소를 포함해야 합니다"),
    (Tag::Unique, "{0}은(는) 고유한 값만 포함해야 합니다"),
    (Tag::Json, "{0}은(는) 올바른 JSON 문자열이어야 합니다"),
    (Tag::Jwt, "{0}은(는) 올바른 JWT 문자열이어야 합니다"),
    (Tag::Lowercase, "{0}은(는) 소문자여야 합니다"),
    (Tag::Uppercase, "{0}은(는) 대문자여야 합니다"),
    (Tag::Boolean, "{0}은(는) 올바른 부울 값이어야 합니다"),
    (Tag::Image, "{0}은(는) 유효한 이미지여야 합니다"),
];

/// フィールド名とパラメータ（参照先のフィールド名など）を埋め込むタグ
const WITH_PARAM: &[(Tag, &str)] = &[
    (Tag::EqField, "{0}은(는) {1}과(와) 같아야 합니다"),
    (Tag::EqCsField, "{0}은(는) {1}과(와) 같아야 합니다"),
    (Tag::NeField, "{0}은(는) {1}과(와) 달라야 합니다"),
    (Tag::NeCsField, "{0}은(는) {1}과(와) 달라야 합니다"),
    (Tag::GtField, "{0}은(는) {1}보다 커야 합니다"),
    (Tag::GtCsField, "{0}은(는) {1}보다 커야 합니다"),
    (Tag::GteField, "{0}은(는) {1}보다 크거나 같아야 합니다"),
    (Tag::GteCsField, "{0}은(는) {1}보다 크거나 같아야 합니다"),
    (Tag::LtField, "{0}은(는) {1}보다 작아야 합니다"),
    (Tag::LtCsField, "{0}은(는) {1}보다 작아야 합니다"),
    (Tag::LteField, "{0}은(는) {1}보다 작거나 같아야 합니다"),
    (Tag::LteCsField, "{0}은(는) {1}보다 작거나 같아야 합니다"),
    (Tag::Contains, "{0}은(는) '{1}'을(를) 포함해야 합니다"),
    (Tag::ContainsAny, "{0}은(는) '{1}' 중 적어도 하나를 포함해야 합니다"),
    (Tag::Excludes, "{0}에는 '{1}'라는 텍스트를 포함할 수 없습니다"),
    (Tag::ExcludesAll, "{0}에는 '{1}'의 어느 것도 포함할 수 없습니다"),
    (Tag::ExcludesRune, "{0}에는 '{1}'을(를) 포함할 수 없습니다"),
    (Tag::Datetime, "{0}은(는) {1} 형식과 일치해야 합니다"),
    // 候補は宣言どおり（引用符も含めて）表示する
    (Tag::OneOf, "{0}은(는) [{1}] 중 하나여야 합니다"),
    (
        Tag::PostcodeIso3166Alpha2,
        "{0}은(는) 국가 코드 {1}의 우편번호 형식과 일치해야 합니다",
    ),
    (
        Tag::PostcodeIso3166Alpha2Field,
        "{0}은(는) {1} 필드에 지정된 국가 코드의 우편번호 형식과 일치해야 합니다",
    ),
];

/// 長さ・大小比較タグの型別テンプレート
struct SizeTemplates {
    tag: Tag,
    string: &'static str,
    number: &'static str,
    items: &'static str,
    datetime: Option<&'static str>,
}

const SIZE: &[SizeTemplates] = &[
    SizeTemplates {
        tag: Tag::Len,
        string: "{0}의 길이는 {1}여야 합니다",
        number: "{0}은(는) {1}과(와) 같아야 합니다",
        items: "{0}은(는) {1}의 항목을 포함해야 합니다",
        datetime: None,
    },
    SizeTemplates {
        tag: Tag::Min,
        string: "{0}의 길이는 최소 {1} 이상이어야 합니다",
        number: "{0}은(는) {1} 이상이어야 합니다",
        items: "{0}은(는) 최소 {1}의 항목을 포함해야 합니다",
        datetime: None,
    },
    SizeTemplates {
        tag: Tag::Max,
        string: "{0}의 길이는 최대 {1}여야 합니다",
        number: "{0}은(는) {1}보다 작거나 같아야 합니다",
        items: "{0}은(는) 최대 {1}의 항목만 포함해야 합니다",
        datetime: None,
    },
    SizeTemplates {
        tag: Tag::Lt,
        string: "{0}의 길이는 {1}보다 짧아야 합니다",
        number: "{0}은(는) {1}보다 작아야 합니다",
        items: "{0}은(는) {1}의 항목보다 적은 항목을 포함해야 합니다",
        datetime: Some("{0}은(는) 현재 시간 이전이어야 합니다"),
    },
    SizeTemplates {
        tag: Tag::Lte,
        string: "{0}의 길이는 최대 {1}여야 합니다",
        number: "{0}은(는) {1}보다 작거나 같아야 합니다",
        items: "{0}은(는) 최대 {1}의 항목만 포함해야 합니다",
        datetime: Some("{0}은(는) 현재 시간 이전이어야 합니다"),
    },
    SizeTemplates {
        tag: Tag::Gt,
        string: "{0}의 길이는 {1}보다 길어야 합니다",
        number: "{0}은(는) {1}보다 커야 합니다",
        items: "{0}은(는) {1}의 항목보다 많은 항목을 포함해야 합니다",
        datetime: Some("{0}은(는) 현재 시간 이후여야 합니다"),
    },
    SizeTemplates {
        tag: Tag::Gte,
        string: "{0}의 길이는 최소 {1} 이상이어야 합니다",
        number: "{0}은(는) {1} 이상이어야 합니다",
        items: "{0}은(는) 최소 {1}의 항목을 포함해야 합니다",
        datetime: Some("{0}은(는) 현재 시간 이후여야 합니다"),
    },
];

const CHARACTER_UNIT: &str = "{0}자";
const ITEM_UNIT: &str = "{0}개";

/// 韓国語の翻訳をすべて登録
///
/// 登録に失敗したら（重複・不正なテンプレートなど）即座にエラーを返す。
pub fn register_default_translations(validator: &mut Validator, trans: &mut Translator) -> Result<()> {
    for &(tag, text) in FIELD_ONLY {
        validator.register_translation(
            tag,
            trans,
            |ut| ut.add(tag.as_str(), text, false),
            Arc::new(translate_field),
        )?;
    }

    for &(tag, text) in WITH_PARAM {
        validator.register_translation(
            tag,
            trans,
            |ut| ut.add(tag.as_str(), text, false),
            Arc::new(translate_field_param),
        )?;
    }

    for size in SIZE {
        validator.register_translation(
            size.tag,
            trans,
            |ut| register_size(ut, size),
            Arc::new(translate_size),
        )?;
    }

    validator.register_translation(
        Tag::Eq,
        trans,
        |ut| ut.add("eq", "{0}은(는) {1}과(와) 같아야 합니다", false),
        Arc::new(translate_eq),
    )?;

    validator.register_translation(
        Tag::Ne,
        trans,
        |ut| {
            ut.add("ne", "{0}은(는) {1}과(와) 달라야 합니다", false)?;
            ut.add("ne-items", "{0}의 항목 수는 {1}과(와) 달라야 합니다", false)?;
            ut.add("ne-empty-string", "빈 문자열", false)
        },
        Arc::new(translate_ne),
    )?;

    trans.verify()?;
    debug!(locale = %trans.locale(), templates = trans.len(), "korean translations registered");
    Ok(())
}

fn register_size(ut: &mut Translator, size: &SizeTemplates) -> Result<()> {
    let name = size.tag.as_str();
    ut.add(&format!("{}-string", name), size.string, false)?;
    ut.add_cardinal(
        &format!("{}-string-character", name),
        CHARACTER_UNIT,
        PluralRule::Other,
        false,
    )?;
    ut.add(&format!("{}-number", name), size.number, false)?;
    ut.add(&format!("{}-items", name), size.items, false)?;
    ut.add_cardinal(
        &format!("{}-items-item", name),
        ITEM_UNIT,
        PluralRule::Other,
        false,
    )?;
    if let Some(datetime) = size.datetime {
        ut.add(&format!("{}-datetime", name), datetime, false)?;
    }
    Ok(())
}

/// メッセージの型区分
enum SizeKind {
    String,
    Items,
    Number,
    Datetime,
}

fn size_kind(kind: &Kind) -> SizeKind {
    match kind {
        Kind::String => SizeKind::String,
        Kind::Slice(_) | Kind::Array(..) | Kind::Map(_) => SizeKind::Items,
        Kind::Time => SizeKind::Datetime,
        _ => SizeKind::Number,
    }
}

/// パラメータを数値として読み、小数点以下の桁数と合わせて返す
fn numeric_param(param: &str) -> (f64, usize) {
    (param.parse().unwrap_or(0.0), param_precision(param))
}

fn translate_field(ut: &Translator, fe: &FieldError) -> Result<String> {
    ut.t(fe.actual_tag(), &[fe.field()])
}

fn translate_field_param(ut: &Translator, fe: &FieldError) -> Result<String> {
    ut.t(fe.actual_tag(), &[fe.field(), fe.param()])
}

fn translate_size(ut: &Translator, fe: &FieldError) -> Result<String> {
    let name = fe.actual_tag();
    let (num, digits) = numeric_param(fe.param());

    match size_kind(fe.kind()) {
        SizeKind::String => {
            let count = ut.c(
                &format!("{}-string-character", name),
                num,
                digits,
                &ut.fmt_number(num, digits),
            )?;
            ut.t(&format!("{}-string", name), &[fe.field(), &count])
        }
        SizeKind::Items => {
            let count = ut.c(
                &format!("{}-items-item", name),
                num,
                digits,
                &ut.fmt_number(num, digits),
            )?;
            ut.t(&format!("{}-items", name), &[fe.field(), &count])
        }
        SizeKind::Datetime => ut.t(&format!("{}-datetime", name), &[fe.field()]),
        SizeKind::Number => ut.t(
            &format!("{}-number", name),
            &[fe.field(), &ut.fmt_number(num, digits)],
        ),
    }
}

fn translate_eq(ut: &Translator, fe: &FieldError) -> Result<String> {
    match size_kind(fe.kind()) {
        SizeKind::Number => {
            let (num, digits) = numeric_param(fe.param());
            ut.t("eq", &[fe.field(), &ut.fmt_number(num, digits)])
        }
        _ => ut.t("eq", &[fe.field(), fe.param()]),
    }
}

fn translate_ne(ut: &Translator, fe: &FieldError) -> Result<String> {
    match size_kind(fe.kind()) {
        SizeKind::String if fe.param().is_empty() => {
            let empty = ut.t("ne-empty-string", &[])?;
            ut.t("ne", &[fe.field(), &empty])
        }
        SizeKind::Items => ut.t("ne-items", &[fe.field(), fe.param()]),
        SizeKind::Number => {
            let (num, digits) = numeric_param(fe.param());
            ut.t("ne", &[fe.field(), &ut.fmt_number(num, digits)])
        }
        _ => ut.t("ne", &[fe.field(), fe.param()]),
    }
}

/// 登録済みの翻訳関数を持たないタグ（空なら漏れなし）
pub fn missing_tags(validator: &Validator) -> Vec<Tag> {
    Tag::ALL
        .iter()
        .copied()
        .filter(|tag| !validator.has_translation(super::Locale::Ko, *tag))
        .collect()
}

/// 任意の翻訳関数を `TranslationFn` に変換
pub fn translation_fn<F>(f: F) -> TranslationFn
where
    F: Fn(&Translator, &FieldError) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}
