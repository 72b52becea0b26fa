use thiserror::Error;

/// 核心库统一的错误类型
#[derive(Debug, Error)]
pub enum PokerError {
    // --- 输入校验错误 ---
    #[error("invalid number of players: {0:?}")]
    InvalidPlayerCount(String),
    #[error("invalid winner: {0:?}")]
    InvalidWinner(String),

    // --- 对局生命周期错误 ---
    #[error("game has already been started")]
    SessionAlreadyStarted,
    #[error("game has not been started")]
    SessionNotStarted,
    #[error("game has already finished")]
    SessionAlreadyFinished,

    /// 提醒的目标输出已关闭（例如 WebSocket 已断开）
    #[error("alert destination is closed")]
    SinkClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = PokerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PokerError::InvalidPlayerCount("Pies".to_string());
        assert_eq!(err.to_string(), "invalid number of players: \"Pies\"");
        assert_eq!(PokerError::SinkClosed.to_string(), "alert destination is closed");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PokerError = io.into();
        assert!(matches!(err, PokerError::Io(_)));
    }
}
