// src/app/manual_scheduler.rs
//! 仮想時計で動く Scheduler。ブラウザ無しで GameController を動かすとき (テストとか) に使うよ。
//! 時間は勝手に進まなくて、`advance_time` で進めた分だけ予約が発火する。

use crate::app::game_controller::GameController;
use crate::app::ports::{GameObserver, Renderer, ScheduledTask, Scheduler, TimerHandle, TimerKind};

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: u64,
    interval_ms: Option<u64>,
    task: ScheduledTask,
    // 同じ時刻なら予約した順に発火させるための通し番号
    seq: u64,
}

#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: i32,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// 予約中の繰り返しタイマーがあるか。
    pub fn has_repeating(&self) -> bool {
        self.pending.iter().any(|p| p.handle.kind == TimerKind::Repeating)
    }

    /// `until_ms` までに発火するものを1つ取り出す。時計はその発火時刻まで進む。
    /// 繰り返しタイマーは次の発火時刻で予約し直される。
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)?;

        let fired_at = self.pending[index].due_ms;
        self.now_ms = self.now_ms.max(fired_at);
        match self.pending[index].interval_ms {
            Some(interval) => {
                let seq = self.bump_seq();
                let timer = &mut self.pending[index];
                timer.due_ms += interval;
                timer.seq = seq;
                Some(timer.task)
            }
            None => Some(self.pending.remove(index).task),
        }
    }

    /// 時計を `until_ms` まで進める (発火は `pop_due` で済ませておくこと)。
    pub fn set_now(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn push(&mut self, delay_ms: u64, interval_ms: Option<u64>, kind: TimerKind, task: ScheduledTask) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle { id: self.next_id, kind };
        let seq = self.bump_seq();
        self.pending.push(PendingTimer {
            handle,
            due_ms: self.now_ms + delay_ms,
            interval_ms,
            task,
            seq,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay_ms: u32, task: ScheduledTask) -> TimerHandle {
        self.push(u64::from(delay_ms), None, TimerKind::Once, task)
    }

    fn every(&mut self, interval_ms: u32, task: ScheduledTask) -> TimerHandle {
        // 0ms 間隔だと無限ループになるので最低 1ms
        let interval = u64::from(interval_ms.max(1));
        self.push(interval, Some(interval), TimerKind::Repeating, task)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}

impl<R: Renderer, O: GameObserver> GameController<R, ManualScheduler, O> {
    /// 仮想時計を `ms` 進めて、その間に来た予約を順番に実行する。
    pub fn advance_time(&mut self, ms: u64) {
        let until = self.scheduler().now_ms() + ms;
        while let Some(task) = self.scheduler_mut().pop_due(until) {
            self.run_task(task);
        }
        self.scheduler_mut().set_now(until);
    }
}
