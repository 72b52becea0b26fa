//! 测试替身：供本库和服务端的测试注入使用
//!
//! 这些类型都是线程安全的，可以直接放进 `Arc` 交给被测代码，
//! 之后再通过访问方法检查记录下来的调用。

use crate::alerter::{AlertHandle, BlindAlerter, ScheduledAlert};
use crate::error::{PokerError, Result};
use crate::game::Game;
use crate::player::League;
use crate::sink::{AlertSink, SharedSink};
use crate::store::PlayerStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// 记录每次登记的提醒，不真正定时
#[derive(Default)]
pub struct SpyBlindAlerter {
    alerts: Mutex<Vec<(ScheduledAlert, AlertHandle)>>,
}

impl SpyBlindAlerter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<ScheduledAlert> {
        self.alerts.lock().iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn handles(&self) -> Vec<AlertHandle> {
        self.alerts.lock().iter().map(|(_, h)| h.clone()).collect()
    }
}

impl BlindAlerter for SpyBlindAlerter {
    fn schedule_alert_at(&self, at: Duration, amount: u32, to: SharedSink) -> AlertHandle {
        let handle = AlertHandle::new();
        self.alerts
            .lock()
            .push((ScheduledAlert { at, amount, to }, handle.clone()));
        handle
    }
}

/// 预置分数和排行榜，并记录 `record_win` 的调用
///
/// `failing()` 构造的实例在 `record_win` 时返回 I/O 错误，且不记录调用。
#[derive(Default)]
pub struct StubPlayerStore {
    scores: HashMap<String, u32>,
    league: League,
    fail_writes: bool,
    win_calls: Mutex<Vec<String>>,
}

impl StubPlayerStore {
    pub fn with_scores<'a>(scores: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        StubPlayerStore {
            scores: scores.into_iter().map(|(n, s)| (n.to_string(), s)).collect(),
            ..Default::default()
        }
    }

    pub fn with_league(league: League) -> Self {
        StubPlayerStore {
            league,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        StubPlayerStore {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn win_calls(&self) -> Vec<String> {
        self.win_calls.lock().clone()
    }
}

impl PlayerStore for StubPlayerStore {
    fn get_player_score(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    fn record_win(&self, name: &str) -> Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::other("store is read-only").into());
        }
        self.win_calls.lock().push(name.to_string());
        Ok(())
    }

    fn get_league(&self) -> League {
        self.league.clone()
    }
}

#[derive(Default)]
struct GameSpyCalls {
    started_with: Option<usize>,
    finished_with: Option<String>,
    abandoned: bool,
}

/// 记录开局/结束参数的对局替身
///
/// 设置了 `blind_alert` 时，开局会立刻往输出目标写这一条提醒。
#[derive(Default)]
pub struct GameSpy {
    blind_alert: Option<String>,
    calls: Mutex<GameSpyCalls>,
}

impl GameSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blind_alert(alert: impl Into<String>) -> Self {
        GameSpy {
            blind_alert: Some(alert.into()),
            ..Default::default()
        }
    }

    pub fn start_called(&self) -> bool {
        self.calls.lock().started_with.is_some()
    }

    pub fn started_with(&self) -> Option<usize> {
        self.calls.lock().started_with
    }

    pub fn finished_with(&self) -> Option<String> {
        self.calls.lock().finished_with.clone()
    }

    pub fn abandoned(&self) -> bool {
        self.calls.lock().abandoned
    }
}

impl Game for GameSpy {
    fn start(&self, number_of_players: usize, alerts_destination: SharedSink) -> Result<()> {
        self.calls.lock().started_with = Some(number_of_players);
        if let Some(alert) = &self.blind_alert {
            alerts_destination.send_alert(alert)?;
        }
        Ok(())
    }

    fn finish(&self, winner: &str) -> Result<()> {
        self.calls.lock().finished_with = Some(winner.to_string());
        Ok(())
    }

    fn abandon(&self) {
        self.calls.lock().abandoned = true;
    }
}

/// 把收到的提醒存在内存里；`closed()` 构造的实例拒绝一切写入
#[derive(Default)]
pub struct RecordingSink {
    closed: bool,
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn closed() -> Self {
        RecordingSink {
            closed: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl AlertSink for RecordingSink {
    fn send_alert(&self, message: &str) -> Result<()> {
        if self.closed {
            return Err(PokerError::SinkClosed);
        }
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}
