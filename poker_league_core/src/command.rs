//! 两个前端共用的输入解析
//!
//! 文字前端和实时前端接收的是同样的两条指令：先是玩家人数，然后是胜者宣告。

use crate::error::{PokerError, Result};

/// 胜者宣告的结尾标记，例如 `"Chris wins"`
pub const WIN_MARKER: &str = " wins";

/// 解析玩家人数：只接受纯数字，且必须大于 0
pub fn parse_number_of_players(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PokerError::InvalidPlayerCount(input.to_string()));
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PokerError::InvalidPlayerCount(input.to_string())),
    }
}

/// 从 `"<name> wins"` 中取出胜者名字；没有结尾标记时整句都当作名字
pub fn extract_winner(input: &str) -> Result<String> {
    let trimmed = input.trim_end();
    let name = trimmed.strip_suffix(WIN_MARKER).unwrap_or(trimmed);
    normalize_winner(name)
}

/// 去掉首尾空白，拒绝空名字
pub fn normalize_winner(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PokerError::InvalidWinner(name.to_string()));
    }
    Ok(name.to_string())
}
