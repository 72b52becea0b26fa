//! 实时前端：把一条 WebSocket 连接桥接到一局游戏
//!
//! 第一条文本消息是玩家人数，第二条是胜者。之后到达的消息一律忽略。
//! 盲注提醒经由通道交给专门的写任务，保证同一连接只有一个写者。

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{stream::StreamExt, SinkExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use poker_league_core::{extract_winner, parse_number_of_players, Game};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePhase {
    AwaitingPlayerCount,
    AwaitingWinner,
    Done,
}

/// 一条连接上的指令状态机，与具体的 socket 无关
pub struct LiveBridge {
    game: Arc<dyn Game>,
    alerts: mpsc::UnboundedSender<String>,
    phase: LivePhase,
}

impl LiveBridge {
    pub fn new(game: Arc<dyn Game>, alerts: mpsc::UnboundedSender<String>) -> Self {
        LiveBridge {
            game,
            alerts,
            phase: LivePhase::AwaitingPlayerCount,
        }
    }

    pub fn phase(&self) -> LivePhase {
        self.phase
    }

    /// 处理一条文本消息；无效或顺序不对的消息只记录日志
    pub fn handle_text(&mut self, text: &str) {
        match self.phase {
            LivePhase::AwaitingPlayerCount => {
                let number_of_players = match parse_number_of_players(text) {
                    Ok(n) => n,
                    Err(e) => {
                        warn!("忽略无效的玩家人数消息: {}", e);
                        return;
                    }
                };
                match self.game.start(number_of_players, Arc::new(self.alerts.clone())) {
                    Ok(()) => self.phase = LivePhase::AwaitingWinner,
                    Err(e) => warn!("开局失败: {}", e),
                }
            }
            LivePhase::AwaitingWinner => {
                match extract_winner(text).and_then(|winner| self.game.finish(&winner)) {
                    Ok(()) => self.phase = LivePhase::Done,
                    Err(e) => warn!("忽略无效的胜者消息: {}", e),
                }
            }
            LivePhase::Done => {
                warn!("对局已结束，忽略消息: {:?}", text);
            }
        }
    }

    /// 连接断开：未结束的对局直接放弃，已记录的胜场不受影响
    pub fn close(self) {
        if self.phase == LivePhase::AwaitingWinner {
            self.game.abandon();
        }
    }
}

/// 处理单个 WebSocket 连接的生命周期
pub async fn handle_socket(socket: WebSocket, game: Arc<dyn Game>) {
    let (mut sender, mut receiver) = socket.split();

    // 所有要发给客户端的消息都经过这个通道
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // 启动一个新任务，专门负责将通道中的消息发送到 WebSocket
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                // 发送失败，说明客户端已断开，退出任务
                break;
            }
        }
    });

    let mut bridge = LiveBridge::new(game, tx);

    // 主循环，处理从客户端接收到的消息
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => bridge.handle_text(text.as_str()),
            Message::Close(_) => break,
            _ => {}
        }
    }

    bridge.close();
    info!("客户端连接关闭");
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_league_core::testing::GameSpy;

    fn setup_bridge(game: Arc<GameSpy>) -> (LiveBridge, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LiveBridge::new(game, tx), rx)
    }

    #[test]
    fn test_player_count_then_winner() {
        let game = Arc::new(GameSpy::with_blind_alert("Blind is 100"));
        let (mut bridge, mut rx) = setup_bridge(game.clone());

        bridge.handle_text("3");
        assert_eq!(game.started_with(), Some(3));
        assert_eq!(rx.try_recv().unwrap(), "Blind is 100");

        bridge.handle_text("Ruth");
        assert_eq!(game.finished_with().as_deref(), Some("Ruth"));
        assert_eq!(bridge.phase(), LivePhase::Done);
    }

    #[test]
    fn test_malformed_player_count_is_ignored() {
        let game = Arc::new(GameSpy::new());
        let (mut bridge, _rx) = setup_bridge(game.clone());

        bridge.handle_text("three");
        bridge.handle_text("0");
        assert!(!game.start_called());
        assert_eq!(bridge.phase(), LivePhase::AwaitingPlayerCount);

        bridge.handle_text("4");
        assert_eq!(game.started_with(), Some(4));
    }

    #[test]
    fn test_winner_announcement_marker_is_stripped() {
        let game = Arc::new(GameSpy::new());
        let (mut bridge, _rx) = setup_bridge(game.clone());

        bridge.handle_text("5");
        bridge.handle_text("   ");
        assert!(game.finished_with().is_none());
        assert_eq!(bridge.phase(), LivePhase::AwaitingWinner);

        bridge.handle_text("Chris wins");
        assert_eq!(game.finished_with().as_deref(), Some("Chris"));
    }

    #[test]
    fn test_messages_after_finish_are_ignored() {
        let game = Arc::new(GameSpy::new());
        let (mut bridge, _rx) = setup_bridge(game.clone());

        bridge.handle_text("5");
        bridge.handle_text("Ruth");
        bridge.handle_text("Cleo");
        assert_eq!(game.finished_with().as_deref(), Some("Ruth"));
    }

    #[test]
    fn test_close_abandons_running_game() {
        let game = Arc::new(GameSpy::new());
        let (mut bridge, _rx) = setup_bridge(game.clone());

        bridge.handle_text("5");
        bridge.close();
        assert!(game.abandoned());
    }

    #[test]
    fn test_close_after_finish_does_not_abandon() {
        let game = Arc::new(GameSpy::new());
        let (mut bridge, _rx) = setup_bridge(game.clone());

        bridge.handle_text("5");
        bridge.handle_text("Ruth");
        bridge.close();
        assert!(!game.abandoned());
    }
}
