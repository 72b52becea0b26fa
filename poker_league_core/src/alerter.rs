use crate::sink::{AlertSink, SharedSink};
use std::fmt;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 盲注提醒的文字形式
pub fn format_blind_alert(amount: u32) -> String {
    format!("Blind is {}", amount)
}

/// 一条已登记的提醒：经过 `at` 之后把 `amount` 写到 `to`
#[derive(Clone)]
pub struct ScheduledAlert {
    pub at: Duration,
    pub amount: u32,
    pub to: SharedSink,
}

impl fmt::Display for ScheduledAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chips at {:?}", self.amount, self.at)
    }
}

impl fmt::Debug for ScheduledAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledAlert")
            .field("at", &self.at)
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

/// 登记提醒后返回的句柄，用于取消尚未触发的提醒
///
/// 对已经触发的提醒调用 `cancel` 没有任何效果。
#[derive(Debug, Clone, Default)]
pub struct AlertHandle {
    token: CancellationToken,
}

impl AlertHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// 盲注定时器：在指定时间后把盲注金额写到输出目标
pub trait BlindAlerter: Send + Sync {
    /// 登记一条提醒并立即返回，不等待提醒触发
    fn schedule_alert_at(&self, at: Duration, amount: u32, to: SharedSink) -> AlertHandle;
}

/// 基于 tokio 定时器的实现，每条提醒一个独立任务
pub struct TokioBlindAlerter {
    runtime: Handle,
}

impl TokioBlindAlerter {
    pub fn new(runtime: Handle) -> Self {
        TokioBlindAlerter { runtime }
    }

    /// 使用当前所在的 tokio 运行时
    ///
    /// # Panics
    /// 不在 tokio 运行时内调用时会 panic。
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl BlindAlerter for TokioBlindAlerter {
    fn schedule_alert_at(&self, at: Duration, amount: u32, to: SharedSink) -> AlertHandle {
        let handle = AlertHandle::new();
        let message = format_blind_alert(amount);

        // 零延迟的提醒当场写出，保证对局立刻结束时第一条盲注也不会丢失
        if at.is_zero() {
            deliver(to.as_ref(), &message);
            return handle;
        }

        let _guard = self.runtime.enter();
        let Some(deadline) = Instant::now().checked_add(at) else {
            debug!("提醒 \"{}\" 的时间超出可表示范围，不会触发", message);
            return handle;
        };
        let token = handle.token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("提醒 \"{}\" 已取消", message);
                }
                _ = tokio::time::sleep_until(deadline) => {
                    deliver(to.as_ref(), &message);
                }
            }
        });
        handle
    }
}

// 提醒是尽力而为的通知，写失败只记录不上报
fn deliver(to: &dyn AlertSink, message: &str) {
    if let Err(e) = to.send_alert(message) {
        debug!("提醒 \"{}\" 发送失败: {}", message, e);
    }
}
