/// 検証メッセージの国際化
///
/// ロケールの優先順位:
/// 1. VALIDATOR_KO_LANG 環境変数
/// 2. LANG 環境変数（システムのロケール設定）
/// 3. デフォルト: ko
///
/// テンプレートは `Translator` に明示的に登録し、参照で渡す。
/// 助詞（은/는 など）は置換後の語の終声から決める。

// サブモジュール
pub mod josa;
pub mod ko;
mod locale;
mod translator;

// 公開エクスポート
pub use josa::{attach_particles, final_sound, FinalSound};
pub use locale::{param_precision, Locale, PluralRule};
pub use translator::Translator;
