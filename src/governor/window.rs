use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// 按时间排序的有界队列，记录一个滑动窗口内的调用时间
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    limit: usize,
    window: Duration,
    entries: VecDeque<DateTime<Utc>>,
}

impl SlidingWindow {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: VecDeque::with_capacity(limit),
        }
    }

    /// 从持久化的时间戳恢复窗口，输入顺序不要求有序
    pub fn from_entries(
        limit: usize,
        window: Duration,
        entries: impl IntoIterator<Item = DateTime<Utc>>,
    ) -> Self {
        let mut sorted: Vec<_> = entries.into_iter().collect();
        sorted.sort();

        let mut this = Self::new(limit, window);
        for entry in sorted {
            this.push(entry);
        }
        this
    }

    /// 丢弃距 `now` 已满一个窗口的记录
    pub fn prune(&mut self, now: DateTime<Utc>) {
        while let Some(&oldest) = self.entries.front() {
            if (now - oldest).num_seconds() >= self.window.num_seconds() {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// 追加一条记录；窗口已满时挤掉最旧的一条
    pub fn push(&mut self, now: DateTime<Utc>) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(now);
    }

    pub fn oldest(&self) -> Option<DateTime<Utc>> {
        self.entries.front().copied()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.entries.len())
    }

    /// 窗口已满时，距最旧记录过期还需等待的秒数，范围 1..=window
    pub fn cooldown(&self, now: DateTime<Utc>) -> Option<u64> {
        if !self.is_full() {
            return None;
        }
        let window = self.window.num_seconds().max(1);
        let elapsed = self
            .oldest()
            .map(|oldest| (now - oldest).num_seconds())
            .unwrap_or(0);
        Some((window - elapsed).clamp(1, window) as u64)
    }

    pub fn entries(&self) -> Vec<DateTime<Utc>> {
        self.entries.iter().copied().collect()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
