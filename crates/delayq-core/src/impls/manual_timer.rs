//! ManualTimer - 仮想時刻で動く Timer 実装（テスト用）
//!
//! # 実装詳細
//! - 登録されたコールバックは `advance()` が呼ばれるまで実行されない
//! - 期限が来たものを「期限順 → 登録順」で実行
//! - ロックを持ったままコールバックを呼ばない（コールバックがストアをロックするため）
//!
//! # 使用例
//! ```ignore
//! let timer = ManualTimer::new();
//! let handle = timer.schedule(Duration::from_secs(5), Box::new(|| println!("fired")));
//! timer.advance(Duration::from_secs(5)); // ここで発火
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::ports::{FireCallback, HandleState, Timer, TimerHandle};

/// (due, seq): seq breaks ties in registration order.
type Slot = (Duration, u64);

struct Scheduled {
    state: Arc<HandleState>,
    on_fire: FireCallback,
}

#[derive(Default)]
struct ManualTimerState {
    now: Duration,
    next_seq: u64,
    scheduled: BTreeMap<Slot, Scheduled>,
}

/// ManualTimer は明示的に時間を進める仮想タイマー
///
/// clone はすべて同じ仮想時刻を共有します。
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Arc<Mutex<ManualTimerState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.lock().scheduled.len()
    }

    /// Move virtual time forward and run every callback that became due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner.now = inner.now.saturating_add(by);
            let later = inner.scheduled.split_off(&(inner.now, u64::MAX));
            std::mem::replace(&mut inner.scheduled, later)
        };

        let mut fired = 0;
        for (_, scheduled) in due {
            if scheduled.state.try_fire() {
                (scheduled.on_fire)();
                fired += 1;
            }
        }
        fired
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ManualTimer")
            .field("now", &inner.now)
            .field("pending", &inner.scheduled.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, on_fire: FireCallback) -> Box<dyn TimerHandle> {
        let state = Arc::new(HandleState::new());
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let slot = (inner.now.saturating_add(delay), inner.next_seq);
        inner.next_seq += 1;
        inner.scheduled.insert(
            slot,
            Scheduled {
                state: Arc::clone(&state),
                on_fire,
            },
        );

        Box::new(ManualTimerHandle {
            state,
            slot,
            timer: Arc::downgrade(&self.inner),
        })
    }
}

struct ManualTimerHandle {
    state: Arc<HandleState>,
    slot: Slot,
    timer: Weak<Mutex<ManualTimerState>>,
}

impl std::fmt::Debug for ManualTimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTimerHandle")
            .field("due", &self.slot.0)
            .field("state", &self.state)
            .finish()
    }
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&self) {
        if !self.state.try_cancel() {
            return;
        }
        // 取り消したコールバックは即座に破棄
        if let Some(timer) = self.timer.upgrade() {
            timer.lock().scheduled.remove(&self.slot);
        }
    }

    fn is_canceled(&self) -> bool {
        self.state.is_canceled()
    }
}
