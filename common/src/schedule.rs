//! フィルタ変更の再描画スケジューリング
//!
//! 変更コマンドはキューに積み、最後の変更から一定時間後に一度だけまとめて処理する。
//! 時刻は `Clock` から取得するため、テストでは `ManualClock` で進められる。

use crate::filter::FilterCommand;
use std::cell::Cell;

/// 現在時刻（ミリ秒）の供給元
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// 手動で進める時計
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// デバウンス付きコマンドキュー
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    delay_ms: u64,
    pending: Vec<FilterCommand>,
    deadline: Option<u64>,
}

impl RenderScheduler {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: Vec::new(),
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// コマンドを積み、期限を延長する
    pub fn enqueue(&mut self, command: FilterCommand, now_ms: u64) {
        self.pending.push(command);
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// 期限を過ぎていれば積まれたコマンドをすべて取り出す
    pub fn poll(&mut self, now_ms: u64) -> Option<Vec<FilterCommand>> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => Some(self.drain()),
            _ => None,
        }
    }

    /// 期限に関係なく取り出す
    pub fn drain(&mut self) -> Vec<FilterCommand> {
        self.deadline = None;
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_changes_coalesce() {
        let clock = ManualClock::new(1_000);
        let mut scheduler = RenderScheduler::new(150);

        scheduler.enqueue(FilterCommand::Category("cv".into()), clock.now_ms());
        clock.advance(100);
        scheduler.enqueue(FilterCommand::Status("done".into()), clock.now_ms());
        clock.advance(100);

        // 最後の変更から150ms経っていない
        assert!(scheduler.poll(clock.now_ms()).is_none());
        assert_eq!(scheduler.next_deadline(), Some(1_250));

        clock.advance(50);
        let drained = scheduler.poll(clock.now_ms()).expect("期限到達");
        assert_eq!(drained.len(), 2);
        assert!(!scheduler.is_pending());
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_poll_without_commands() {
        let mut scheduler = RenderScheduler::new(150);
        assert!(scheduler.poll(u64::MAX).is_none());
        assert!(scheduler.drain().is_empty());
    }
}
