//! SchedulerConfig - コアの設定値

use serde::{Deserialize, Serialize};

/// Upper bound on a task delay: one day.
pub const DEFAULT_MAX_DELAY_SECS: u32 = 86_400;

/// SchedulerConfig は LifecycleController の設定
///
/// `max_delay_secs` はコア自身では検証しません。API 層が入力検証に使う上限です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub max_delay_secs: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
        }
    }
}
