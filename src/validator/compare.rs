//! 長さ・大小比較とフィールド間比較

use crate::rule::Tag;
use crate::schema::{parse_bool, Kind};
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// 比較結果をタグの意味に当てはめる
fn satisfies(tag: Tag, ord: Ordering) -> bool {
    match tag {
        Tag::Len | Tag::Eq | Tag::EqField | Tag::EqCsField => ord == Ordering::Equal,
        Tag::Ne | Tag::NeField | Tag::NeCsField => ord != Ordering::Equal,
        Tag::Min | Tag::Gte | Tag::GteField | Tag::GteCsField => ord != Ordering::Less,
        Tag::Max | Tag::Lte | Tag::LteField | Tag::LteCsField => ord != Ordering::Greater,
        Tag::Lt | Tag::LtField | Tag::LtCsField => ord == Ordering::Less,
        Tag::Gt | Tag::GtField | Tag::GtCsField => ord == Ordering::Greater,
        _ => false,
    }
}

/// len/min/max/eq/ne/lt/lte/gt/gte の検査
///
/// 文字列は文字数、コレクションは要素数、数値は値、時刻は現在時刻と比較する。
/// 文字列の eq/ne は内容を比較する。
pub fn check_size(tag: Tag, kind: &Kind, value: &Value, param: &str, now: DateTime<Utc>) -> bool {
    let ord = match kind {
        Kind::String => {
            let Some(s) = value.as_str() else {
                return false;
            };
            if matches!(tag, Tag::Eq | Tag::Ne) {
                return (s == param) == (tag == Tag::Eq);
            }
            param
                .parse::<usize>()
                .ok()
                .map(|limit| s.chars().count().cmp(&limit))
        }
        k if k.is_collection() => param.parse::<usize>().ok().map(|limit| value.len().cmp(&limit)),
        Kind::Int => value
            .as_i64()
            .zip(param.parse::<i64>().ok())
            .map(|(v, p)| v.cmp(&p)),
        Kind::Uint => value
            .as_u64()
            .zip(param.parse::<u64>().ok())
            .map(|(v, p)| v.cmp(&p)),
        Kind::Float => value
            .as_f64()
            .zip(param.parse::<f64>().ok())
            .and_then(|(v, p)| v.partial_cmp(&p)),
        Kind::Bool => value
            .as_bool()
            .zip(parse_bool(param))
            .map(|(v, p)| v.cmp(&p)),
        Kind::Time => value.as_time().map(|t| t.cmp(&now)),
        _ => None,
    };
    ord.is_some_and(|ord| satisfies(tag, ord))
}

/// フィールド間の比較（eqfield, gtcsfield など）
///
/// 参照先が見つからない、または型が異なる場合は nefield/necsfield のみ成功する。
pub fn check_field(tag: Tag, left: (&Value, &Kind), right: Option<(&Value, &Kind)>) -> bool {
    let not_equal = matches!(tag, Tag::NeField | Tag::NeCsField);
    let Some((right_value, right_kind)) = right else {
        return not_equal;
    };
    let (left_value, left_kind) = left;
    if !left_kind.same_family(right_kind) {
        return not_equal;
    }

    let ord = if matches!(
        tag,
        Tag::EqField | Tag::EqCsField | Tag::NeField | Tag::NeCsField
    ) {
        equality(left_kind, left_value, right_value)
    } else {
        ordering(left_kind, left_value, right_value)
    };
    match ord {
        Some(ord) => satisfies(tag, ord),
        None => not_equal,
    }
}

/// 等価比較（文字列は内容、コレクション・構造体は要素ごと）
fn equality(kind: &Kind, a: &Value, b: &Value) -> Option<Ordering> {
    let equal = match kind {
        Kind::Int | Kind::Uint | Kind::Float | Kind::Time => {
            return ordering(kind, a, b);
        }
        _ => a == b,
    };
    Some(if equal {
        Ordering::Equal
    } else {
        Ordering::Less
    })
}

/// 大小比較（文字列は文字数、コレクションは要素数）
fn ordering(kind: &Kind, a: &Value, b: &Value) -> Option<Ordering> {
    match kind {
        Kind::String => Some(a.as_str()?.chars().count().cmp(&b.as_str()?.chars().count())),
        k if k.is_collection() => Some(a.len().cmp(&b.len())),
        Kind::Int => Some(a.as_i64()?.cmp(&b.as_i64()?)),
        Kind::Uint => Some(a.as_u64()?.cmp(&b.as_u64()?)),
        Kind::Float => a.as_f64()?.partial_cmp(&b.as_f64()?),
        Kind::Time => Some(a.as_time()?.cmp(&b.as_time()?)),
        _ => None,
    }
}
