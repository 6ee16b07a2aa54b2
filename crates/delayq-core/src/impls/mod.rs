//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: プロセス内のタスクストア（挿入順を保持）
//! - **TokioTimer**: tokio ランタイム上の遅延実行（本番用）
//! - **ManualTimer**: 仮想時刻で動く遅延実行（テスト用）

pub mod inmem_store;
pub mod manual_timer;
pub mod tokio_timer;

// 主要な型を再エクスポート
pub use self::inmem_store::InMemoryTaskStore;
pub use self::manual_timer::ManualTimer;
pub use self::tokio_timer::TokioTimer;
