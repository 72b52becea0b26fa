use crate::alerter::{AlertHandle, BlindAlerter};
use crate::command::normalize_winner;
use crate::error::{PokerError, Result};
use crate::sink::SharedSink;
use crate::store::PlayerStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 固定的盲注阶梯，每局都一样
pub const BLIND_LADDER: [u32; 11] = [100, 200, 300, 400, 500, 600, 800, 1000, 2000, 4000, 8000];

/// 盲注间隔的基础分钟数，实际间隔为 `基础 + 玩家人数`
pub const BASE_BLIND_INTERVAL_MINUTES: u64 = 5;

/// 计算一局的盲注时间表
///
/// 第 i 档盲注在开局后 `i * (5 + 玩家人数)` 分钟触发，第一档立即触发。
/// 人数大到时间无法表示时返回 `InvalidPlayerCount`。
pub fn blind_schedule(number_of_players: usize) -> Result<Vec<(Duration, u32)>> {
    let invalid = || PokerError::InvalidPlayerCount(number_of_players.to_string());
    let interval_secs = u64::try_from(number_of_players)
        .ok()
        .and_then(|n| n.checked_add(BASE_BLIND_INTERVAL_MINUTES))
        .and_then(|minutes| minutes.checked_mul(60))
        .ok_or_else(invalid)?;
    let interval = Duration::from_secs(interval_secs);
    BLIND_LADDER
        .iter()
        .enumerate()
        .map(|(i, &amount)| -> Result<(Duration, u32)> {
            let at = interval.checked_mul(i as u32).ok_or_else(invalid)?;
            Ok((at, amount))
        })
        .collect()
}

/// 一局游戏的控制接口，两个前端都只依赖这个 trait
pub trait Game: Send + Sync {
    /// 开局：登记全部盲注提醒后立即返回
    fn start(&self, number_of_players: usize, alerts_destination: SharedSink) -> Result<()>;
    /// 结束：记录胜者，并取消尚未触发的提醒
    fn finish(&self, winner: &str) -> Result<()>;
    /// 放弃未结束的对局（例如连接断开），不记录胜者
    fn abandon(&self) {}
}

#[derive(Debug)]
enum Phase {
    Idle,
    Running {
        number_of_players: usize,
        alerts: Vec<AlertHandle>,
    },
    Finished {
        number_of_players: usize,
        winner: String,
    },
    Abandoned {
        number_of_players: usize,
    },
}

/// 德州扑克对局，一个实例只对应一局，结束后不再复用
pub struct TexasHoldem {
    alerter: Arc<dyn BlindAlerter>,
    store: Arc<dyn PlayerStore>,
    phase: Mutex<Phase>,
}

impl TexasHoldem {
    pub fn new(alerter: Arc<dyn BlindAlerter>, store: Arc<dyn PlayerStore>) -> Self {
        TexasHoldem {
            alerter,
            store,
            phase: Mutex::new(Phase::Idle),
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(*self.phase.lock(), Phase::Idle)
    }

    pub fn number_of_players(&self) -> Option<usize> {
        match &*self.phase.lock() {
            Phase::Idle => None,
            Phase::Running { number_of_players, .. }
            | Phase::Finished { number_of_players, .. }
            | Phase::Abandoned { number_of_players } => Some(*number_of_players),
        }
    }

    pub fn winner(&self) -> Option<String> {
        match &*self.phase.lock() {
            Phase::Finished { winner, .. } => Some(winner.clone()),
            _ => None,
        }
    }
}

impl Game for TexasHoldem {
    fn start(&self, number_of_players: usize, alerts_destination: SharedSink) -> Result<()> {
        if number_of_players == 0 {
            return Err(PokerError::InvalidPlayerCount(number_of_players.to_string()));
        }

        let schedule = blind_schedule(number_of_players)?;

        let mut phase = self.phase.lock();
        match *phase {
            Phase::Idle => {}
            Phase::Running { .. } => return Err(PokerError::SessionAlreadyStarted),
            Phase::Finished { .. } | Phase::Abandoned { .. } => {
                return Err(PokerError::SessionAlreadyFinished);
            }
        }

        let alerts = schedule
            .into_iter()
            .map(|(at, amount)| {
                self.alerter.schedule_alert_at(at, amount, alerts_destination.clone())
            })
            .collect();
        *phase = Phase::Running {
            number_of_players,
            alerts,
        };
        info!("对局开始，玩家人数 {}", number_of_players);
        Ok(())
    }

    fn finish(&self, winner: &str) -> Result<()> {
        let winner = normalize_winner(winner)?;

        let mut phase = self.phase.lock();
        let (number_of_players, alerts) = match &*phase {
            Phase::Idle => return Err(PokerError::SessionNotStarted),
            Phase::Finished { .. } | Phase::Abandoned { .. } => {
                return Err(PokerError::SessionAlreadyFinished);
            }
            Phase::Running {
                number_of_players,
                alerts,
            } => (*number_of_players, alerts),
        };

        self.store.record_win(&winner)?;
        alerts.iter().for_each(AlertHandle::cancel);
        info!("对局结束，胜者是 {}", winner);
        *phase = Phase::Finished {
            number_of_players,
            winner,
        };
        Ok(())
    }

    fn abandon(&self) {
        let mut phase = self.phase.lock();
        if let Phase::Running {
            number_of_players,
            alerts,
        } = &*phase
        {
            alerts.iter().for_each(AlertHandle::cancel);
            info!("对局被放弃，已取消 {} 条盲注提醒", alerts.len());
            let number_of_players = *number_of_players;
            *phase = Phase::Abandoned { number_of_players };
        }
    }
}
