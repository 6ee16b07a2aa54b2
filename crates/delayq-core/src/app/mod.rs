//! App - アプリケーション層
//!
//! ports を組み合わせてタスクのライフサイクルを実装します。
//!
//! # 主要コンポーネント
//! - **ControllerBuilder**: 構築とワイヤリング
//! - **LifecycleController**: 作成・キャンセル・参照・全消去（状態遷移の所有者）
//! - **SchedulerConfig**: 設定値
//! - **TaskCounts**: ステータス別の件数

pub mod builder;
pub mod config;
pub mod controller;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, ControllerBuilder};
pub use self::config::{DEFAULT_MAX_DELAY_SECS, SchedulerConfig};
pub use self::controller::LifecycleController;
pub use self::status::TaskCounts;
