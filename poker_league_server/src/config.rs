use poker_league_core::STORE_PATH_ENV;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// 监听地址的环境变量
pub const ADDR_ENV: &str = "POKER_LEAGUE_ADDR";

/// 服务器启动配置
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// 战绩文件路径，`None` 表示使用内存存储
    pub store_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            store_path: None,
        }
    }
}

impl ServerConfig {
    /// 从进程环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, AddrParseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AddrParseError> {
        let mut config = Self::default();
        if let Some(addr) = lookup(ADDR_ENV) {
            config.addr = addr.trim().parse()?;
        }
        config.store_path = lookup(STORE_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Ok(config)
    }
}
