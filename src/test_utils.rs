//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::sync::Once;

use crate::validate::{
    Entries,
    Targets,
};

/// tracing の初期化は一度だけ
static TRACING: Once = Once::new();

/// テスト出力に tracing のログを流す
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// 言語とテキストの組から Targets を作成する
fn targets(pairs: &[(&str, &str)]) -> Targets {
    pairs.iter().map(|(language, text)| ((*language).to_string(), (*text).to_string())).collect()
}

/// テスト用の翻訳データ
///
/// `sample_json` / `sample_yaml` と同じ内容
pub(crate) fn sample_entries() -> Entries {
    [
        ("hello", targets(&[("es", "hola"), ("it", "ciao"), ("en", "hello"), ("de", "hallo")])),
        ("world", targets(&[("es", "mundo"), ("it", "mondo"), ("en", "world"), ("de", "welt")])),
        ("hello\nworld", targets(&[("es", "hola\nmundo")])),
    ]
    .into_iter()
    .map(|(source, targets)| (source.to_string(), targets))
    .collect()
}

/// `sample_entries` の JSON 表現
pub(crate) const fn sample_json() -> &'static str {
    r#"
{
  "hello": {
    "es": "hola",
    "it": "ciao",
    "en": "hello",
    "de": "hallo"
  },
  "world": {
    "es": "mundo",
    "it": "mondo",
    "en": "world",
    "de": "welt"
  },
  "hello\nworld": {
    "es": "hola\nmundo"
  }
}
"#
}

/// `sample_entries` の YAML 表現（ブロックスカラーを含む）
pub(crate) const fn sample_yaml() -> &'static str {
    r#"
hello:
  de: hallo
  en: hello
  es: hola
  it: ciao

world:
  de: welt
  en: world
  es: mundo
  it: mondo

"hello\nworld":
  es: |-
    hola
    mundo
"#
}
