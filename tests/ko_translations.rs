//! 韓国語メッセージの適合テスト
//!
//! すべてのタグを1つずつ失敗させ、名前空間ごとの翻訳結果を確認する。

use chrono::{Duration, Utc};
use validator_ko::i18n::{ko, Locale, Translator};
use validator_ko::{new_hashmap, Error, Kind, Record, Schema, Tag, ValidationErrors, Validator, Value};

fn setup() -> (Validator, Translator) {
    let mut validator = Validator::new();
    let mut trans = Translator::new(Locale::Ko);
    ko::register_default_translations(&mut validator, &mut trans).unwrap();
    (validator, trans)
}

fn inner_schema() -> Schema {
    Schema::builder("Inner")
        .field("EqCSFieldString", Kind::String, "")
        .field("NeCSFieldString", Kind::String, "")
        .field("GtCSFieldString", Kind::String, "")
        .field("GteCSFieldString", Kind::String, "")
        .field("LtCSFieldString", Kind::String, "")
        .field("LteCSFieldString", Kind::String, "")
        .field("RequiredIf", Kind::String, "")
        .build()
        .unwrap()
}

fn test_schema() -> Schema {
    let strings = || Kind::slice(Kind::String);
    Schema::builder("Test")
        .nested("Inner", inner_schema())
        .field("RequiredString", Kind::String, "required")
        .field("RequiredNumber", Kind::Int, "required")
        .field("RequiredMultiple", strings(), "required")
        .field("RequiredIf", Kind::String, "required_if=Inner.RequiredIf abcd")
        .field("LenString", Kind::String, "len=1")
        .field("LenNumber", Kind::Float, "len=1113.00")
        .field("LenMultiple", strings(), "len=7")
        .field("MinString", Kind::String, "min=1")
        .field("MinNumber", Kind::Float, "min=1113.00")
        .field("MinMultiple", strings(), "min=7")
        .field("MaxString", Kind::String, "max=3")
        .field("MaxNumber", Kind::Float, "max=1113.00")
        .field("MaxMultiple", strings(), "max=7")
        .field("EqString", Kind::String, "eq=3")
        .field("EqNumber", Kind::Float, "eq=2.33")
        .field("EqMultiple", strings(), "eq=7")
        .field("NeString", Kind::String, "ne=")
        .field("NeNumber", Kind::Float, "ne=0.00")
        .field("NeMultiple", strings(), "ne=0")
        .field("LtString", Kind::String, "lt=3")
        .field("LtNumber", Kind::Float, "lt=5.56")
        .field("LtMultiple", strings(), "lt=2")
        .field("LtTime", Kind::Time, "lt")
        .field("LteString", Kind::String, "lte=3")
        .field("LteNumber", Kind::Float, "lte=5.56")
        .field("LteMultiple", strings(), "lte=2")
        .field("LteTime", Kind::Time, "lte")
        .field("GtString", Kind::String, "gt=3")
        .field("GtNumber", Kind::Float, "gt=5.56")
        .field("GtMultiple", strings(), "gt=2")
        .field("GtTime", Kind::Time, "gt")
        .field("GteString", Kind::String, "gte=3")
        .field("GteNumber", Kind::Float, "gte=5.56")
        .field("GteMultiple", strings(), "gte=2")
        .field("GteTime", Kind::Time, "gte")
        .field("EqFieldString", Kind::String, "eqfield=MaxString")
        .field("EqCSFieldString", Kind::String, "eqcsfield=Inner.EqCSFieldString")
        .field("NeCSFieldString", Kind::String, "necsfield=Inner.NeCSFieldString")
        .field("GtCSFieldString", Kind::String, "gtcsfield=Inner.GtCSFieldString")
        .field("GteCSFieldString", Kind::String, "gtecsfield=Inner.GteCSFieldString")
        .field("LtCSFieldString", Kind::String, "ltcsfield=Inner.LtCSFieldString")
        .field("LteCSFieldString", Kind::String, "ltecsfield=Inner.LteCSFieldString")
        .field("NeFieldString", Kind::String, "nefield=EqFieldString")
        .field("GtFieldString", Kind::String, "gtfield=MaxString")
        .field("GteFieldString", Kind::String, "gtefield=MaxString")
        .field("LtFieldString", Kind::String, "ltfield=MaxString")
        .field("LteFieldString", Kind::String, "ltefield=MaxString")
        .field("AlphaString", Kind::String, "alpha")
        .field("AlphanumString", Kind::String, "alphanum")
        .field("NumericString", Kind::String, "numeric")
        .field("NumberString", Kind::String, "number")
        .field("HexadecimalString", Kind::String, "hexadecimal")
        .field("HexColorString", Kind::String, "hexcolor")
        .field("RGBColorString", Kind::String, "rgb")
        .field("RGBAColorString", Kind::String, "rgba")
        .field("HSLColorString", Kind::String, "hsl")
        .field("HSLAColorString", Kind::String, "hsla")
        .field("Email", Kind::String, "email")
        .field("URL", Kind::String, "url")
        .field("URI", Kind::String, "uri")
        .field("Base64", Kind::String, "base64")
        .field("Contains", Kind::String, "contains=purpose")
        .field("ContainsAny", Kind::String, "containsany=!@#$")
        .field("Excludes", Kind::String, "excludes=text")
        .field("ExcludesAll", Kind::String, "excludesall=!@#$")
        .field("ExcludesRune", Kind::String, "excludesrune=☻")
        .field("ISBN", Kind::String, "isbn")
        .field("ISBN10", Kind::String, "isbn10")
        .field("ISBN13", Kind::String, "isbn13")
        .field("ISSN", Kind::String, "issn")
        .field("UUID", Kind::String, "uuid")
        .field("UUID3", Kind::String, "uuid3")
        .field("UUID4", Kind::String, "uuid4")
        .field("UUID5", Kind::String, "uuid5")
        .field("ULID", Kind::String, "ulid")
        .field("ASCII", Kind::String, "ascii")
        .field("PrintableASCII", Kind::String, "printascii")
        .field("MultiByte", Kind::String, "multibyte")
        .field("DataURI", Kind::String, "datauri")
        .field("Latitude", Kind::String, "latitude")
        .field("Longitude", Kind::String, "longitude")
        .field("SSN", Kind::String, "ssn")
        .field("IP", Kind::String, "ip")
        .field("IPv4", Kind::String, "ipv4")
        .field("IPv6", Kind::String, "ipv6")
        .field("CIDR", Kind::String, "cidr")
        .field("CIDRv4", Kind::String, "cidrv4")
        .field("CIDRv6", Kind::String, "cidrv6")
        .field("TCPAddr", Kind::String, "tcp_addr")
        .field("TCPAddrv4", Kind::String, "tcp4_addr")
        .field("TCPAddrv6", Kind::String, "tcp6_addr")
        .field("UDPAddr", Kind::String, "udp_addr")
        .field("UDPAddrv4", Kind::String, "udp4_addr")
        .field("UDPAddrv6", Kind::String, "udp6_addr")
        .field("IPAddr", Kind::String, "ip_addr")
        .field("IPAddrv4", Kind::String, "ip4_addr")
        .field("IPAddrv6", Kind::String, "ip6_addr")
        .field("UinxAddr", Kind::String, "unix_addr")
        .field("MAC", Kind::String, "mac")
        .field("IsColor", Kind::String, "iscolor")
        .optional("StrPtrMinLen", Kind::String, "min=10")
        .optional("StrPtrMaxLen", Kind::String, "max=1")
        .optional("StrPtrLen", Kind::String, "len=2")
        .optional("StrPtrLt", Kind::String, "lt=1")
        .optional("StrPtrLte", Kind::String, "lte=1")
        .optional("StrPtrGt", Kind::String, "gt=10")
        .optional("StrPtrGte", Kind::String, "gte=10")
        .field("OneOfString", Kind::String, "oneof=red green")
        .field("OneOfInt", Kind::Int, "oneof=5 63")
        .field("UniqueSlice", strings(), "unique")
        .field("UniqueArray", Kind::array(Kind::String, 3), "unique")
        .field("UniqueMap", Kind::map(Kind::String), "unique")
        .field("JSONString", Kind::String, "json")
        .field("JWTString", Kind::String, "jwt")
        .field("LowercaseString", Kind::String, "lowercase")
        .field("UppercaseString", Kind::String, "uppercase")
        .field("Datetime", Kind::String, "datetime=2006-01-02")
        .field("PostCode", Kind::String, "postcode_iso3166_alpha2=SG")
        .field("PostCodeCountry", Kind::String, "")
        .field(
            "PostCodeByField",
            Kind::String,
            "postcode_iso3166_alpha2_field=PostCodeCountry",
        )
        .field("BooleanString", Kind::String, "boolean")
        .field("Image", Kind::String, "image")
        .build()
        .unwrap()
}

fn test_record() -> Record {
    let inner = Record::new()
        .with("EqCSFieldString", "1234")
        .with("GtCSFieldString", "1234")
        .with("GteCSFieldString", "1234")
        .with("RequiredIf", "abcd");

    let tomorrow = Utc::now() + Duration::hours(24);
    let mut unique_map = new_hashmap();
    unique_map.insert("key1".to_string(), Value::from("1234"));
    unique_map.insert("key2".to_string(), Value::from("1234"));

    Record::new()
        .with("Inner", inner)
        .with("MaxString", "1234")
        .with("MaxNumber", 2000.0)
        .with("MaxMultiple", vec![""; 9])
        .with("LtString", "1234")
        .with("LtNumber", 6.0)
        .with("LtMultiple", vec![""; 3])
        .with("LtTime", tomorrow)
        .with("LteString", "1234")
        .with("LteNumber", 6.0)
        .with("LteMultiple", vec![""; 3])
        .with("LteTime", tomorrow)
        .with("LtFieldString", "12345")
        .with("LteFieldString", "12345")
        .with("LtCSFieldString", "1234")
        .with("LteCSFieldString", "1234")
        .with("AlphaString", "abc3")
        .with("AlphanumString", "abc3!")
        .with("NumericString", "12E.00")
        .with("NumberString", "12E")
        .with("Excludes", "this is some test text")
        .with("ExcludesAll", "This is Great!")
        .with("ExcludesRune", "Love it ☻")
        .with("ASCII", "가나다라")
        .with("PrintableASCII", "가나다라")
        .with("MultiByte", "1234feerf")
        .with("LowercaseString", "ABCDEFG")
        .with("UppercaseString", "abcdefg")
        .with("StrPtrMaxLen", "toolong")
        .with("StrPtrLen", "toolong")
        .with("UniqueSlice", vec!["1234", "1234"])
        .with("UniqueMap", Value::Map(unique_map))
        .with("Datetime", "2008-Feb-01")
        .with("BooleanString", "A")
}

fn validate() -> (ValidationErrors, Translator) {
    let (validator, trans) = setup();
    let errs = validator
        .validate(&test_schema(), &test_record())
        .unwrap_err();
    (errs, trans)
}

const EXPECTED: &[(&str, &str)] = &[
    ("Test.IsColor", "IsColor는 올바른 색이어야 합니다"),
    ("Test.MAC", "MAC는 올바른 MAC 주소를 포함해야 합니다"),
    ("Test.IPAddr", "IPAddr는 해석 가능한 IP 주소여야 합니다"),
    ("Test.IPAddrv4", "IPAddrv4는 해석 가능한 IPv4 주소여야 합니다"),
    ("Test.IPAddrv6", "IPAddrv6는 해석 가능한 IPv6 주소여야 합니다"),
    ("Test.UDPAddr", "UDPAddr는 올바른 UDP 주소여야 합니다"),
    ("Test.UDPAddrv4", "UDPAddrv4는 올바른 IPv4의 UDP 주소여야 합니다"),
    ("Test.UDPAddrv6", "UDPAddrv6는 올바른 IPv6의 UDP 주소여야 합니다"),
    ("Test.TCPAddr", "TCPAddr는 올바른 TCP 주소여야 합니다"),
    ("Test.TCPAddrv4", "TCPAddrv4는 올바른 IPv4의 TCP 주소여야 합니다"),
    ("Test.TCPAddrv6", "TCPAddrv6는 올바른 IPv6의 TCP 주소여야 합니다"),
    ("Test.CIDR", "CIDR는 올바른 CIDR 표기를 포함해야 합니다"),
    ("Test.CIDRv4", "CIDRv4는 IPv4 주소의 올바른 CIDR 표기를 포함해야 합니다"),
    ("Test.CIDRv6", "CIDRv6는 IPv6 주소의 올바른 CIDR 표기를 포함해야 합니다"),
    ("Test.SSN", "SSN는 올바른 사회 보장 번호여야 합니다"),
    ("Test.IP", "IP는 올바른 IP 주소여야 합니다"),
    ("Test.IPv4", "IPv4는 올바른 IPv4 주소여야 합니다"),
    ("Test.IPv6", "IPv6는 올바른 IPv6 주소여야 합니다"),
    ("Test.DataURI", "DataURI는 올바른 데이터 URI를 포함해야 합니다"),
    ("Test.Latitude", "Latitude는 올바른 위도 좌표를 포함해야 합니다"),
    ("Test.Longitude", "Longitude는 올바른 경도 좌표를 포함해야 합니다"),
    ("Test.MultiByte", "MultiByte는 멀티바이트 문자를 포함해야 합니다"),
    ("Test.ASCII", "ASCII는 ASCII 문자만을 포함해야 합니다"),
    ("Test.PrintableASCII", "PrintableASCII는 인쇄 가능한 ASCII 문자만을 포함해야 합니다"),
    ("Test.UUID", "UUID는 올바른 UUID여야 합니다"),
    ("Test.UUID3", "UUID3는 버전 3의 올바른 UUID여야 합니다"),
    ("Test.UUID4", "UUID4는 버전 4의 올바른 UUID여야 합니다"),
    ("Test.UUID5", "UUID5는 버전 5의 올바른 UUID여야 합니다"),
    ("Test.ULID", "ULID는 올바른 ULID여야 합니다"),
    ("Test.ISBN", "ISBN는 올바른 ISBN 번호여야 합니다"),
    ("Test.ISBN10", "ISBN10는 올바른 ISBN-10 번호여야 합니다"),
    ("Test.ISBN13", "ISBN13는 올바른 ISBN-13 번호여야 합니다"),
    ("Test.ISSN", "ISSN는 올바른 ISSN 번호여야 합니다"),
    ("Test.Excludes", "Excludes에는 'text'라는 텍스트를 포함할 수 없습니다"),
    ("Test.ExcludesAll", "ExcludesAll에는 '!@#$'의 어느 것도 포함할 수 없습니다"),
    ("Test.ExcludesRune", "ExcludesRune에는 '☻'를 포함할 수 없습니다"),
    ("Test.ContainsAny", "ContainsAny는 '!@#$' 중 적어도 하나를 포함해야 합니다"),
    ("Test.Contains", "Contains는 'purpose'를 포함해야 합니다"),
    ("Test.Base64", "Base64는 올바른 Base64 문자열이어야 합니다"),
    ("Test.Email", "Email은 올바른 이메일 주소여야 합니다"),
    ("Test.URL", "URL은 올바른 URL이어야 합니다"),
    ("Test.URI", "URI는 올바른 URI이어야 합니다"),
    ("Test.RGBColorString", "RGBColorString은 올바른 RGB 색상 코드여야 합니다"),
    ("Test.RGBAColorString", "RGBAColorString은 올바른 RGBA 색상 코드여야 합니다"),
    ("Test.HSLColorString", "HSLColorString은 올바른 HSL 색상 코드여야 합니다"),
    ("Test.HSLAColorString", "HSLAColorString은 올바른 HSLA 색상 코드여야 합니다"),
    ("Test.HexadecimalString", "HexadecimalString은 올바른 16진수 표기여야 합니다"),
    ("Test.HexColorString", "HexColorString은 올바른 HEX 색상 코드여야 합니다"),
    ("Test.NumberString", "NumberString은 올바른 숫자여야 합니다"),
    ("Test.NumericString", "NumericString은 올바른 숫자여야 합니다"),
    ("Test.AlphanumString", "AlphanumString은 알파벳과 숫자만을 포함할 수 있습니다"),
    ("Test.AlphaString", "AlphaString은 알파벳만을 포함할 수 있습니다"),
    ("Test.LtFieldString", "LtFieldString은 MaxString보다 작아야 합니다"),
    ("Test.LteFieldString", "LteFieldString은 MaxString보다 작거나 같아야 합니다"),
    ("Test.GtFieldString", "GtFieldString은 MaxString보다 커야 합니다"),
    ("Test.GteFieldString", "GteFieldString은 MaxString보다 크거나 같아야 합니다"),
    ("Test.NeFieldString", "NeFieldString은 EqFieldString과 달라야 합니다"),
    ("Test.LtCSFieldString", "LtCSFieldString은 Inner.LtCSFieldString보다 작아야 합니다"),
    ("Test.LteCSFieldString", "LteCSFieldString은 Inner.LteCSFieldString보다 작거나 같아야 합니다"),
    ("Test.GtCSFieldString", "GtCSFieldString은 Inner.GtCSFieldString보다 커야 합니다"),
    ("Test.GteCSFieldString", "GteCSFieldString은 Inner.GteCSFieldString보다 크거나 같아야 합니다"),
    ("Test.NeCSFieldString", "NeCSFieldString은 Inner.NeCSFieldString과 달라야 합니다"),
    ("Test.EqCSFieldString", "EqCSFieldString은 Inner.EqCSFieldString과 같아야 합니다"),
    ("Test.EqFieldString", "EqFieldString은 MaxString과 같아야 합니다"),
    ("Test.GteString", "GteString의 길이는 최소 3자 이상이어야 합니다"),
    ("Test.GteNumber", "GteNumber는 5.56 이상이어야 합니다"),
    ("Test.GteMultiple", "GteMultiple은 최소 2개의 항목을 포함해야 합니다"),
    ("Test.GteTime", "GteTime은 현재 시간 이후여야 합니다"),
    ("Test.GtString", "GtString의 길이는 3자보다 길어야 합니다"),
    ("Test.GtNumber", "GtNumber는 5.56보다 커야 합니다"),
    ("Test.GtMultiple", "GtMultiple은 2개의 항목보다 많은 항목을 포함해야 합니다"),
    ("Test.GtTime", "GtTime은 현재 시간 이후여야 합니다"),
    ("Test.LteString", "LteString의 길이는 최대 3자여야 합니다"),
    ("Test.LteNumber", "LteNumber는 5.56보다 작거나 같아야 합니다"),
    ("Test.LteMultiple", "LteMultiple은 최대 2개의 항목만 포함해야 합니다"),
    ("Test.LteTime", "LteTime은 현재 시간 이전이어야 합니다"),
    ("Test.LtString", "LtString의 길이는 3자보다 짧아야 합니다"),
    ("Test.LtNumber", "LtNumber는 5.56보다 작아야 합니다"),
    ("Test.LtMultiple", "LtMultiple은 2개의 항목보다 적은 항목을 포함해야 합니다"),
    ("Test.LtTime", "LtTime은 현재 시간 이전이어야 합니다"),
    ("Test.NeString", "NeString은 빈 문자열과 달라야 합니다"),
    ("Test.NeNumber", "NeNumber는 0.00과 달라야 합니다"),
    ("Test.NeMultiple", "NeMultiple의 항목 수는 0과 달라야 합니다"),
    ("Test.EqString", "EqString은 3과 같아야 합니다"),
    ("Test.EqNumber", "EqNumber는 2.33과 같아야 합니다"),
    ("Test.EqMultiple", "EqMultiple은 7과 같아야 합니다"),
    ("Test.MaxString", "MaxString의 길이는 최대 3자여야 합니다"),
    ("Test.MaxNumber", "MaxNumber는 1,113.00보다 작거나 같아야 합니다"),
    ("Test.MaxMultiple", "MaxMultiple은 최대 7개의 항목만 포함해야 합니다"),
    ("Test.MinString", "MinString의 길이는 최소 1자 이상이어야 합니다"),
    ("Test.MinNumber", "MinNumber는 1,113.00 이상이어야 합니다"),
    ("Test.MinMultiple", "MinMultiple은 최소 7개의 항목을 포함해야 합니다"),
    ("Test.LenString", "LenString의 길이는 1자여야 합니다"),
    ("Test.LenNumber", "LenNumber는 1,113.00과 같아야 합니다"),
    ("Test.LenMultiple", "LenMultiple은 7개의 항목을 포함해야 합니다"),
    ("Test.RequiredString", "RequiredString은 필수 필드입니다"),
    ("Test.RequiredIf", "RequiredIf는 필수 필드입니다"),
    ("Test.RequiredNumber", "RequiredNumber는 필수 필드입니다"),
    ("Test.RequiredMultiple", "RequiredMultiple은 필수 필드입니다"),
    ("Test.StrPtrMinLen", "StrPtrMinLen의 길이는 최소 10자 이상이어야 합니다"),
    ("Test.StrPtrMaxLen", "StrPtrMaxLen의 길이는 최대 1자여야 합니다"),
    ("Test.StrPtrLen", "StrPtrLen의 길이는 2자여야 합니다"),
    ("Test.StrPtrLt", "StrPtrLt의 길이는 1자보다 짧아야 합니다"),
    ("Test.StrPtrLte", "StrPtrLte의 길이는 최대 1자여야 합니다"),
    ("Test.StrPtrGt", "StrPtrGt의 길이는 10자보다 길어야 합니다"),
    ("Test.StrPtrGte", "StrPtrGte의 길이는 최소 10자 이상이어야 합니다"),
    ("Test.OneOfString", "OneOfString은 [red green] 중 하나여야 합니다"),
    ("Test.OneOfInt", "OneOfInt는 [5 63] 중 하나여야 합니다"),
    ("Test.Image", "Image는 유효한 이미지여야 합니다"),
    ("Test.UniqueSlice", "UniqueSlice는 고유한 값만 포함해야 합니다"),
    ("Test.UniqueArray", "UniqueArray는 고유한 값만 포함해야 합니다"),
    ("Test.UniqueMap", "UniqueMap은 고유한 값만 포함해야 합니다"),
    ("Test.JSONString", "JSONString은 올바른 JSON 문자열이어야 합니다"),
    ("Test.JWTString", "JWTString은 올바른 JWT 문자열이어야 합니다"),
    ("Test.LowercaseString", "LowercaseString은 소문자여야 합니다"),
    ("Test.UppercaseString", "UppercaseString은 대문자여야 합니다"),
    ("Test.Datetime", "Datetime은 2006-01-02 형식과 일치해야 합니다"),
    ("Test.PostCode", "PostCode는 국가 코드 SG의 우편번호 형식과 일치해야 합니다"),
    ("Test.PostCodeByField", "PostCodeByField는 PostCodeCountry 필드에 지정된 국가 코드의 우편번호 형식과 일치해야 합니다"),
    ("Test.BooleanString", "BooleanString은 올바른 부울 값이어야 합니다"),
];

#[test]
fn test_translations() {
    let (errs, trans) = validate();

    for (ns, expected) in EXPECTED {
        let fe = errs
            .find(ns)
            .unwrap_or_else(|| panic!("no failure for {}", ns));
        assert_eq!(fe.translate(&trans).unwrap(), *expected, "namespace {}", ns);
    }
}

#[test]
fn test_every_annotated_field_fails_except_unix_addr() {
    let (errs, _) = validate();
    assert!(errs.find("Test.UinxAddr").is_none());
    assert!(errs.find("Test.PostCodeCountry").is_none());
    assert!(errs.find("Test.Inner").is_none());
    assert_eq!(errs.len(), EXPECTED.len());
}

#[test]
fn test_translation_is_repeatable() {
    let (errs, trans) = validate();
    for fe in errs.iter() {
        assert_eq!(fe.translate(&trans).unwrap(), fe.translate(&trans).unwrap());
    }
}

#[test]
fn test_cross_field_messages_name_the_other_field() {
    let (errs, trans) = validate();
    let fe = errs.find("Test.EqFieldString").unwrap();
    assert_eq!(fe.tag(), Tag::EqField);
    assert_eq!(fe.param(), "MaxString");
    let message = fe.translate(&trans).unwrap();
    assert!(message.contains("MaxString"));
    assert!(!message.contains("1234"));
}

#[test]
fn test_failure_metadata() {
    let (errs, _) = validate();
    let fe = errs.find("Test.StrPtrMinLen").unwrap();
    assert_eq!(fe.struct_namespace(), "Test.StrPtrMinLen");
    assert_eq!(fe.field(), "StrPtrMinLen");
    assert_eq!(fe.tag(), Tag::Min);
    assert_eq!(fe.param(), "10");
    assert_eq!(fe.kind(), &Kind::String);
    assert_eq!(fe.type_label(), "*string");
    assert!(fe.value().is_nil());
}

#[test]
fn test_unregistered_translator_reports_missing_translation() {
    let other = Validator::new();
    let schema = Schema::builder("T")
        .field("Name", Kind::String, "required")
        .build()
        .unwrap();
    let err = other
        .validate(&schema, &Record::new())
        .unwrap_err()
        .iter()
        .next()
        .unwrap()
        .translate(&Translator::new(Locale::Ko))
        .unwrap_err();
    assert!(matches!(err, Error::MissingTranslation { .. }));
}

#[test]
fn test_parallel_validation_matches_sequential() {
    let (validator, trans) = setup();
    let schema = test_schema();
    let records = vec![test_record(); 80];

    let results = validator.validate_many(&schema, &records);
    assert_eq!(results.len(), 80);
    for result in results {
        let errs = result.unwrap_err();
        assert_eq!(errs.len(), EXPECTED.len());
        assert_eq!(
            errs.find("Test.MaxNumber").unwrap().translate(&trans).unwrap(),
            "MaxNumber는 1,113.00보다 작거나 같아야 합니다"
        );
    }
}
