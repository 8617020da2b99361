//! 韓国語の助詞選択
//!
//! テンプレートには `은(는)` のように両形を書き、置換後の直前の語の
//! 終声（받침）の有無で一方を選ぶ。
//!
//! - ハングル音節: 받침の有無（ㄹ받침は区別する）
//! - 数値リテラル（`1,113.00` など）: 末尾の数字の漢字語読み（영, 일, 이…）
//! - 識別子末尾の数字: 英語読み（one, two…）
//! - 末尾の大文字: アルファベット名（엘, 엠…）
//! - それ以外の英単語: 綴りの語末

/// 直前の語の終声
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalSound {
    /// 받침なし（母音終わり）
    Open,
    /// ㄹ받침
    Rieul,
    /// ㄹ以外の받침
    Closed,
}

impl FinalSound {
    /// 받침があるか（ㄹを含む）
    pub fn has_batchim(self) -> bool {
        !matches!(self, FinalSound::Open)
    }
}

/// (テンプレート上の表記, 받침あり, 받침なし)
const PAIRS: &[(&str, &str, &str)] = &[
    ("은(는)", "은", "는"),
    ("이(가)", "이", "가"),
    ("을(를)", "을", "를"),
    ("과(와)", "과", "와"),
    ("으로(로)", "으로", "로"),
];

const HANGUL_START: u32 = 0xAC00;
const HANGUL_END: u32 = 0xD7A3;
const JONG_COUNT: u32 = 28;
const JONG_RIEUL: u32 = 8;

/// 語の終声を判定
pub fn final_sound(word: &str) -> FinalSound {
    let word = word.trim_end_matches(['\'', '"', ')', ']', '}', '>']);
    let Some(last) = word.chars().last() else {
        return FinalSound::Open;
    };

    let code = last as u32;
    if (HANGUL_START..=HANGUL_END).contains(&code) {
        return match (code - HANGUL_START) % JONG_COUNT {
            0 => FinalSound::Open,
            JONG_RIEUL => FinalSound::Rieul,
            _ => FinalSound::Closed,
        };
    }

    if is_numeric_literal(word) {
        return word
            .chars()
            .rev()
            .find(char::is_ascii_digit)
            .map_or(FinalSound::Open, sino_korean_digit);
    }

    if last.is_ascii_digit() {
        return english_digit(last);
    }

    if last.is_ascii_uppercase() {
        return match last {
            'L' => FinalSound::Rieul,
            'M' => FinalSound::Closed,
            _ => FinalSound::Open,
        };
    }

    if last.is_ascii_lowercase() {
        return english_ending(word);
    }

    FinalSound::Open
}

/// 数字と符号・区切りだけからなる語
fn is_numeric_literal(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '+' | '-'))
}

/// 영 일 이 삼 사 오 육 칠 팔 구
fn sino_korean_digit(digit: char) -> FinalSound {
    match digit {
        '1' | '7' | '8' => FinalSound::Rieul,
        '0' | '3' | '6' => FinalSound::Closed,
        _ => FinalSound::Open,
    }
}

/// zero one two three four five six seven eight nine
fn english_digit(digit: char) -> FinalSound {
    match digit {
        '1' | '7' | '8' | '9' => FinalSound::Closed,
        _ => FinalSound::Open,
    }
}

fn english_ending(word: &str) -> FinalSound {
    let lower = word.to_ascii_lowercase();
    let ends = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(s));

    if ends(&["ng", "m", "me", "n", "ne", "p", "pe", "b", "k"]) {
        FinalSound::Closed
    } else if ends(&["l", "le"]) {
        FinalSound::Rieul
    } else {
        FinalSound::Open
    }
}

/// 助詞を選ぶ
fn choose(
    sound: FinalSound,
    pair: &str,
    with_batchim: &'static str,
    without: &'static str,
) -> &'static str {
    // 으로/로 はㄹ받침でも 로
    if pair == "으로(로)" && sound == FinalSound::Rieul {
        return without;
    }
    if sound.has_batchim() {
        with_batchim
    } else {
        without
    }
}

/// 文中の `은(는)` などを直前の語に合わせて置き換える
pub fn attach_particles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_with_particles(&mut out, text);
    out
}

/// `text` を `out` の末尾に追加し、その中の助詞だけを確定させる
///
/// 直前の語は `out` に既に書かれた内容から判定するため、
/// 埋め込み済みのパラメータは書き換えずに助詞の判定だけに使える。
pub fn push_with_particles(out: &mut String, text: &str) {
    let mut rest = text;

    'scan: while let Some(ch) = rest.chars().next() {
        for &(pair, with_batchim, without) in PAIRS {
            if let Some(after) = rest.strip_prefix(pair) {
                let word = out.rsplit(char::is_whitespace).next().unwrap_or("");
                let particle = choose(final_sound(word), pair, with_batchim, without);
                out.push_str(particle);
                rest = after;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
}
