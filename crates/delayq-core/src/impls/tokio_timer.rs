//! TokioTimer - tokio のタイマーで遅延実行する Timer 実装
//!
//! # 実装詳細
//! - ハンドルごとに 1 つの tokio task を spawn し、`sleep(delay)` 後に発火
//! - 発火とキャンセルは `HandleState` の CAS で調停（at-most-once）
//! - キャンセル成功時は sleep 中の task も abort してリソースを解放
//!
//! tokio の paused clock（`start_paused = true`）でも動くので、
//! テストでは時間を決定的に進められます。

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::ports::{FireCallback, HandleState, Timer, TimerHandle};

/// TokioTimer は tokio ランタイム上で遅延実行する
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, on_fire: FireCallback) -> Box<dyn TimerHandle> {
        let state = Arc::new(HandleState::new());
        let fire_state = Arc::clone(&state);

        // spawn するので delay == 0 でもここでは実行されない
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if fire_state.try_fire() {
                on_fire();
            }
        });

        Box::new(TokioTimerHandle {
            state,
            abort: join.abort_handle(),
        })
    }
}

#[derive(Debug)]
struct TokioTimerHandle {
    state: Arc<HandleState>,
    abort: AbortHandle,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        if self.state.try_cancel() {
            self.abort.abort();
        }
    }

    fn is_canceled(&self) -> bool {
        self.state.is_canceled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, FireCallback) {
        let hits = Arc::new(AtomicUsize::new(0));
        let cb_hits = Arc::clone(&hits);
        let cb: FireCallback = Box::new(move || {
            cb_hits.fetch_add(1, Ordering::SeqCst);
        });
        (hits, cb)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let timer = TokioTimer::try_current().unwrap();
        let (hits, cb) = counter();

        let _handle = timer.schedule(Duration::from_secs(5), cb);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_is_not_inline() {
        let timer = TokioTimer::try_current().unwrap();
        let (hits, cb) = counter();

        let _handle = timer.schedule(Duration::ZERO, cb);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_fire_prevents_callback() {
        let timer = TokioTimer::try_current().unwrap();
        let (hits, cb) = counter();

        let handle = timer.schedule(Duration::from_secs(100), cb);
        handle.cancel();
        assert!(handle.is_canceled());

        tokio::time::sleep(Duration::from_secs(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_noop() {
        let timer = TokioTimer::try_current().unwrap();
        let (hits, cb) = counter();

        let handle = timer.schedule(Duration::from_secs(1), cb);
        tokio::time::sleep(Duration::from_secs(2)).await;

        handle.cancel();
        assert!(!handle.is_canceled());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn try_current_outside_runtime_is_none() {
        assert!(TokioTimer::try_current().is_none());
    }
}
