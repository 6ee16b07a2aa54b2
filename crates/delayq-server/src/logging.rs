//! tracing の初期化

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` があればそれを優先し、なければ `default_filter` を使う
///
/// グローバル subscriber は一度しか設定できないので、二回目はエラー。
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}
