use std::time::{Duration, Instant};

/// 自動儲存間隔。 / Fixed interval between auto-save ticks.
pub const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(30);

/// 由主事件迴圈輪詢的可取消週期計時器。 / Cancellable periodic timer polled from the host event loop.
///
/// The timer never fires on its own: the host calls [`AutoSaveTimer::poll`]
/// whenever it wakes up and uses [`AutoSaveTimer::remaining`] to schedule the
/// next wake-up. Every tick reschedules the next one a full interval later.
#[derive(Debug, Clone)]
pub struct AutoSaveTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl AutoSaveTimer {
    /// 建立尚未啟動的計時器。 / Creates a stopped timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// 建立並立即啟動計時器。 / Creates a timer whose first tick is one interval after `now`.
    pub fn started(interval: Duration, now: Instant) -> Self {
        let mut timer = Self::new(interval);
        timer.start(now);
        timer
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// 停止計時器；之後的輪詢都不會觸發。 / Stops the timer; later polls never tick.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// 若已到期則回傳 `true` 並排定下一次。 / Returns `true` when a tick is due and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// 距離下一次觸發的時間。 / Time left until the next tick, `None` once cancelled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}

impl Default for AutoSaveTimer {
    fn default() -> Self {
        Self::new(AUTO_SAVE_INTERVAL)
    }
}
