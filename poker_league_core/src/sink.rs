use crate::error::{PokerError, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 盲注提醒的输出目标（控制台或一条实时连接）
///
/// 同一个目标可能被多个定时任务同时写入，实现需要保证单条消息不会交错。
pub trait AlertSink: Send + Sync {
    fn send_alert(&self, message: &str) -> Result<()>;
}

pub type SharedSink = Arc<dyn AlertSink>;

/// 包装一个 `Write`，既用于输出提示文字，也用于接收盲注提醒
pub struct ConsoleSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        ConsoleSink {
            writer: Mutex::new(writer),
        }
    }

    /// 原样写出文本，不追加换行
    pub fn write_text(&self, text: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl ConsoleSink<Vec<u8>> {
    /// 目前为止写入的全部内容
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock()).into_owned()
    }
}

impl<W: Write + Send> AlertSink for ConsoleSink<W> {
    fn send_alert(&self, message: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", message)?;
        writer.flush()?;
        Ok(())
    }
}

// WebSocket 连接的写任务从这个通道取消息，通道关闭说明连接已断开
impl AlertSink for mpsc::UnboundedSender<String> {
    fn send_alert(&self, message: &str) -> Result<()> {
        self.send(message.to_string()).map_err(|_| PokerError::SinkClosed)
    }
}
