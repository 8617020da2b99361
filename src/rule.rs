//! 検証ルール（タグ）の定義とタグ文字列のパース
//!
//! `"required,min=3"` のようなタグ文字列は、スキーマ構築時に一度だけ
//! `Rule` の列へ変換される。未知のタグはここでエラーになる。

use crate::error::{Error, Result};
use smallvec::SmallVec;

/// タグ定義マクロ（列挙型・名前変換・全タグ一覧を生成）
macro_rules! define_tags {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// 検証ルール名
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $($variant,)*
        }

        impl Tag {
            /// 定義順の全タグ
            pub const ALL: &'static [Tag] = &[$(Tag::$variant,)*];

            /// タグ文字列上の名前
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                }
            }

            /// 名前からタグを取得
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Tag::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_tags! {
    // 存在チェック
    Required => "required",
    RequiredIf => "required_if",
    RequiredUnless => "required_unless",
    RequiredWith => "required_with",
    RequiredWithout => "required_without",

    // 長さ・大小比較
    Len => "len",
    Min => "min",
    Max => "max",
    Eq => "eq",
    Ne => "ne",
    Lt => "lt",
    Lte => "lte",
    Gt => "gt",
    Gte => "gte",

    // 同一構造体内のフィールド比較
    EqField => "eqfield",
    NeField => "nefield",
    GtField => "gtfield",
    GteField => "gtefield",
    LtField => "ltfield",
    LteField => "ltefield",

    // 構造体をまたぐフィールド比較
    EqCsField => "eqcsfield",
    NeCsField => "necsfield",
    GtCsField => "gtcsfield",
    GteCsField => "gtecsfield",
    LtCsField => "ltcsfield",
    LteCsField => "ltecsfield",

    // 文字列フォーマット
    Alpha => "alpha",
    Alphanum => "alphanum",
    Numeric => "numeric",
    Number => "number",
    Hexadecimal => "hexadecimal",
    HexColor => "hexcolor",
    Rgb => "rgb",
    Rgba => "rgba",
    Hsl => "hsl",
    Hsla => "hsla",
    IsColor => "iscolor",
    Email => "email",
    Url => "url",
    Uri => "uri",
    Base64 => "base64",
    Contains => "contains",
    ContainsAny => "containsany",
    Excludes => "excludes",
    ExcludesAll => "excludesall",
    ExcludesRune => "excludesrune",
    Isbn => "isbn",
    Isbn10 => "isbn10",
    Isbn13 => "isbn13",
    Issn => "issn",
    Uuid => "uuid",
    Uuid3 => "uuid3",
    Uuid4 => "uuid4",
    Uuid5 => "uuid5",
    Ulid => "ulid",
    Ascii => "ascii",
    PrintAscii => "printascii",
    Multibyte => "multibyte",
    DataUri => "datauri",
    Latitude => "latitude",
    Longitude => "longitude",
    Ssn => "ssn",
    Json => "json",
    Jwt => "jwt",
    Lowercase => "lowercase",
    Uppercase => "uppercase",
    Boolean => "boolean",
    Datetime => "datetime",
    PostcodeIso3166Alpha2 => "postcode_iso3166_alpha2",
    PostcodeIso3166Alpha2Field => "postcode_iso3166_alpha2_field",

    // ネットワーク
    Ip => "ip",
    Ipv4 => "ipv4",
    Ipv6 => "ipv6",
    Cidr => "cidr",
    Cidrv4 => "cidrv4",
    Cidrv6 => "cidrv6",
    TcpAddr => "tcp_addr",
    Tcp4Addr => "tcp4_addr",
    Tcp6Addr => "tcp6_addr",
    UdpAddr => "udp_addr",
    Udp4Addr => "udp4_addr",
    Udp6Addr => "udp6_addr",
    IpAddr => "ip_addr",
    Ip4Addr => "ip4_addr",
    Ip6Addr => "ip6_addr",
    UnixAddr => "unix_addr",
    Mac => "mac",

    // コレクション・ファイル
    OneOf => "oneof",
    Unique => "unique",
    Image => "image",
}

/// omitemptyの修飾子名（ルールではないためTagには含めない）
pub const OMIT_EMPTY: &str = "omitempty";

impl Tag {
    /// nilのポインタフィールドでも評価するタグ（存在チェック系）
    pub fn runs_when_nil(self) -> bool {
        matches!(
            self,
            Tag::Required
                | Tag::RequiredIf
                | Tag::RequiredUnless
                | Tag::RequiredWith
                | Tag::RequiredWithout
        )
    }

    /// パラメータが同一構造体内のフィールドパスを指すタグ
    pub fn references_sibling(self) -> bool {
        matches!(
            self,
            Tag::EqField
                | Tag::NeField
                | Tag::GtField
                | Tag::GteField
                | Tag::LtField
                | Tag::LteField
                | Tag::PostcodeIso3166Alpha2Field
        )
    }

    /// パラメータがトップレベル構造体からのフィールドパスを指すタグ
    pub fn references_top_level(self) -> bool {
        matches!(
            self,
            Tag::EqCsField
                | Tag::NeCsField
                | Tag::GtCsField
                | Tag::GteCsField
                | Tag::LtCsField
                | Tag::LteCsField
        )
    }

    /// 長さ・大小比較タグ
    pub fn is_size(self) -> bool {
        matches!(
            self,
            Tag::Len
                | Tag::Min
                | Tag::Max
                | Tag::Eq
                | Tag::Ne
                | Tag::Lt
                | Tag::Lte
                | Tag::Gt
                | Tag::Gte
        )
    }

    /// 名前が最も近いタグ（タイプミスのサジェスト用）
    pub fn suggest(name: &str) -> Option<Tag> {
        Tag::ALL
            .iter()
            .map(|tag| (strsim::levenshtein(name, tag.as_str()), *tag))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, tag)| tag)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1つの検証ルール（タグ + パラメータ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub tag: Tag,
    pub param: String,
}

impl Rule {
    pub fn new(tag: Tag, param: impl Into<String>) -> Self {
        Self {
            tag,
            param: param.into(),
        }
    }

    /// スペース区切りのパラメータを分割（'...'で囲んだ部分は1語）
    pub fn params(&self) -> SmallVec<[String; 4]> {
        split_params(&self.param)
    }
}

/// パース済みのタグ文字列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTags {
    pub rules: Vec<Rule>,
    pub omit_empty: bool,
}

/// タグ文字列をパース
///
/// - `,` でルールを区切り、`=` の右側をパラメータとする
/// - パラメータ中の `0x2C` は `,` に、`0x7C` は `|` に置換する
pub fn parse_tags(field: &str, spec: &str) -> Result<ParsedTags> {
    let mut parsed = ParsedTags::default();

    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (name, param) = match token.split_once('=') {
            Some((name, param)) => (name, param),
            None => (token, ""),
        };

        if name == OMIT_EMPTY {
            parsed.omit_empty = true;
            continue;
        }

        let Some(tag) = Tag::from_name(name) else {
            return Err(Error::UnknownTag {
                field: field.to_string(),
                tag: name.to_string(),
                suggestion: Tag::suggest(name).map(|t| t.as_str().to_string()),
            });
        };

        let param = param.replace("0x2C", ",").replace("0x7C", "|");
        parsed.rules.push(Rule::new(tag, param));
    }

    Ok(parsed)
}

/// パラメータを空白で分割（シングルクォートで囲めば空白を含められる）
pub fn split_params(param: &str) -> SmallVec<[String; 4]> {
    let mut words = SmallVec::new();
    let mut chars = param.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let mut word = String::new();
        if ch == '\'' {
            chars.next();
            for c in chars.by_ref() {
                if c == '\'' {
                    break;
                }
                word.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
        }
        words.push(word);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_with_params() {
        let parsed = parse_tags("Name", "required,min=3,containsany=!@#$").unwrap();
        assert_eq!(
            parsed.rules,
            vec![
                Rule::new(Tag::Required, ""),
                Rule::new(Tag::Min, "3"),
                Rule::new(Tag::ContainsAny, "!@#$"),
            ]
        );
        assert!(!parsed.omit_empty);
    }

    #[test]
    fn test_parse_tags_omitempty_and_empty_param() {
        let parsed = parse_tags("Name", "omitempty,ne=").unwrap();
        assert!(parsed.omit_empty);
        assert_eq!(parsed.rules, vec![Rule::new(Tag::Ne, "")]);
    }

    #[test]
    fn test_parse_tags_escaped_comma() {
        let parsed = parse_tags("Name", "contains=a0x2Cb").unwrap();
        assert_eq!(parsed.rules[0].param, "a,b");
    }

    #[test]
    fn test_unknown_tag_suggests_nearest() {
        let err = parse_tags("Email", "emial").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownTag {
                field: "Email".to_string(),
                tag: "emial".to_string(),
                suggestion: Some("email".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_tag_without_suggestion() {
        let err = parse_tags("X", "completely_unrelated").unwrap_err();
        assert!(matches!(err, Error::UnknownTag { suggestion: None, .. }));
    }

    #[test]
    fn test_split_params_quoted() {
        let words = split_params("red 'light blue'  green");
        assert_eq!(words.as_slice(), ["red", "light blue", "green"]);
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.as_str()), Some(*tag));
        }
    }
}
