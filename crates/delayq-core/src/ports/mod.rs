//! Ports - 抽象化レイヤー
//!
//! 各 trait はランタイム（tokio timer）や時刻、ID 生成、ストレージへの
//! インターフェースを提供し、実装の詳細を隠蔽します。
//! テストでは FixedClock / ManualTimer に差し替えます。

pub mod clock;
pub mod id_generator;
pub mod task_store;
pub mod timer;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::task_store::{TaskEntry, TaskStore};
pub use self::timer::{FireCallback, HandleState, Timer, TimerHandle};
