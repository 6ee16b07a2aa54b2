//! Timer port - 遅延実行の抽象化
//!
//! `schedule` が返すハンドルで、発火前のコールバックを取り消せます。
//!
//! # 保証
//! - コールバックはハンドルごとに高々 1 回だけ実行される（at-most-once）
//! - 発火前に `cancel()` されたコールバックは実行されない
//! - 発火後（実行中・実行済み）の `cancel()` は何もしない
//! - delay が 0 でも `schedule` の中で同期実行はしない

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

/// 発火時に一度だけ呼ばれるコールバック
pub type FireCallback = Box<dyn FnOnce() + Send + 'static>;

/// Timer は遅延実行を登録する
pub trait Timer: Send + Sync {
    fn schedule(&self, delay: Duration, on_fire: FireCallback) -> Box<dyn TimerHandle>;
}

/// 登録済みの遅延実行への参照
pub trait TimerHandle: Send + Sync + fmt::Debug {
    /// Prevent the callback from running if it has not started yet.
    fn cancel(&self);

    /// Whether `cancel` won the race (the callback will never run).
    fn is_canceled(&self) -> bool;
}

const ARMED: u8 = 0;
const FIRED: u8 = 1;
const CANCELED: u8 = 2;

/// Shared fire/cancel arbitration for one handle.
///
/// Exactly one of `try_fire` / `try_cancel` can succeed; both move the state
/// out of `ARMED` with a compare-and-swap.
#[derive(Debug, Default)]
pub struct HandleState(AtomicU8);

impl HandleState {
    pub fn new() -> Self {
        Self(AtomicU8::new(ARMED))
    }

    pub fn try_fire(&self) -> bool {
        self.transition(FIRED)
    }

    pub fn try_cancel(&self) -> bool {
        self.transition(CANCELED)
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Acquire) == CANCELED
    }

    fn transition(&self, to: u8) -> bool {
        self.0
            .compare_exchange(ARMED, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_wins_once() {
        let state = HandleState::new();
        assert!(state.try_fire());
        assert!(!state.try_fire());
        assert!(!state.try_cancel());
        assert!(!state.is_canceled());
    }

    #[test]
    fn cancel_blocks_fire() {
        let state = HandleState::new();
        assert!(state.try_cancel());
        assert!(!state.try_fire());
        assert!(state.is_canceled());
        assert!(!state.try_cancel());
    }

    #[test]
    fn racing_threads_see_exactly_one_winner() {
        use std::sync::Arc;

        for _ in 0..100 {
            let state = Arc::new(HandleState::new());
            let fire = {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.try_fire())
            };
            let cancel = {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.try_cancel())
            };

            let fired = fire.join().unwrap();
            let canceled = cancel.join().unwrap();
            assert!(fired ^ canceled);
        }
    }
}
