use crate::command::{extract_winner, parse_number_of_players};
use crate::error::{PokerError, Result};
use crate::game::Game;
use crate::sink::ConsoleSink;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{info, warn};

pub const PLAYER_PROMPT: &str = "Please enter the number of players: ";
pub const BAD_PLAYER_INPUT_ERR_MSG: &str =
    "Bad value received for number of players, please try again with a number";
pub const BAD_WINNER_INPUT_ERR_MSG: &str = "Bad value received for winner, expected '<name> wins'";

/// 文字前端：从输入流逐行读取指令，驱动一局游戏
///
/// 提示文字和盲注提醒写到同一个输出，所以提醒会穿插在控制台输出中。
pub struct Cli<R, W> {
    input: Lines<R>,
    output: Arc<ConsoleSink<W>>,
    game: Arc<dyn Game>,
}

impl<R, W> Cli<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    pub fn new(input: R, output: Arc<ConsoleSink<W>>, game: Arc<dyn Game>) -> Self {
        Cli {
            input: input.lines(),
            output,
            game,
        }
    }

    /// 跑完一局：读人数、开局、读胜者、结束
    ///
    /// 输入结束时直接返回，不算错误。无效的人数或胜者只提示用户；
    /// 其他错误（读写失败、存储失败、对局状态不对）返回 `Err`。
    pub async fn play_poker(&mut self) -> Result<()> {
        self.output.write_text(PLAYER_PROMPT)?;

        let Some(line) = self.input.next_line().await? else {
            return Ok(());
        };
        let number_of_players = match parse_number_of_players(&line) {
            Ok(n) => n,
            Err(e) => {
                info!("玩家人数输入无效: {}", e);
                return self.output.write_text(BAD_PLAYER_INPUT_ERR_MSG);
            }
        };

        match self.game.start(number_of_players, self.output.clone()) {
            Ok(()) => {}
            Err(e @ PokerError::InvalidPlayerCount(_)) => {
                info!("玩家人数无法开局: {}", e);
                return self.output.write_text(BAD_PLAYER_INPUT_ERR_MSG);
            }
            Err(e) => return Err(e),
        }

        let Some(line) = self.input.next_line().await? else {
            return Ok(());
        };
        match extract_winner(&line).and_then(|winner| self.game.finish(&winner)) {
            Ok(()) => Ok(()),
            Err(e @ PokerError::InvalidWinner(_)) => {
                info!("胜者输入无效: {}", e);
                self.output.write_text(BAD_WINNER_INPUT_ERR_MSG)
            }
            Err(e) => {
                warn!("无法结束对局: {}", e);
                Err(e)
            }
        }
    }
}
