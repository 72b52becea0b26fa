//! # 扑克联赛核心库
//!
//! 这个 `core` crate 包含一局限时扑克的全部核心逻辑：
//! 按玩家人数安排盲注上涨的提醒、记录胜者、维护战绩排行榜，
//! 以及读取控制台指令的文字前端。
//! 网络服务器只依赖这里定义的 trait，因此可以注入测试替身。

mod alerter;
mod cli;
mod command;
mod error;
mod game;
mod player;
mod sink;
mod store;
pub mod testing;

pub use alerter::*;

pub use cli::*;

pub use command::*;

pub use error::*;

pub use game::*;

pub use player::*;

pub use sink::*;

pub use store::*;
