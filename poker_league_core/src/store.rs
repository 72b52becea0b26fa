use crate::error::Result;
use crate::player::{find_player, rank_league, League, Player};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 战绩存储：记录每位玩家的胜场并生成排行榜
///
/// 实现必须自行保证并发安全：多个连接可能同时记录胜场或读取排行榜。
pub trait PlayerStore: Send + Sync {
    /// 查询玩家胜场，未知玩家返回 0
    fn get_player_score(&self, name: &str) -> u32;
    /// 为玩家记一场胜利，玩家不存在时自动创建
    fn record_win(&self, name: &str) -> Result<()>;
    /// 当前所有玩家的战绩快照
    fn get_league(&self) -> League;
}

/// 纯内存的战绩存储，进程退出后数据丢失
#[derive(Default)]
pub struct InMemoryPlayerStore {
    scores: RwLock<HashMap<String, u32>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn get_player_score(&self, name: &str) -> u32 {
        self.scores.read().get(name).copied().unwrap_or(0)
    }

    fn record_win(&self, name: &str) -> Result<()> {
        *self.scores.write().entry(name.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn get_league(&self) -> League {
        let mut league: League = self
            .scores
            .read()
            .iter()
            .map(|(name, wins)| Player::new(name.clone(), *wins))
            .collect();
        rank_league(&mut league);
        league
    }
}

/// 以 JSON 文件保存的战绩存储
///
/// 文件内容是 `Player` 数组。每次记录胜场都会整体重写文件。
pub struct FileSystemPlayerStore {
    path: PathBuf,
    league: RwLock<League>,
}

impl FileSystemPlayerStore {
    /// 打开（或新建）存储文件。文件不存在或为空时视为空排行榜。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut league: League = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        rank_league(&mut league);
        info!("从 {} 载入了 {} 名玩家的战绩", path.display(), league.len());
        Ok(Self {
            path,
            league: RwLock::new(league),
        })
    }

    fn persist(&self, league: &League) -> Result<()> {
        let json = serde_json::to_string_pretty(league)?;
        fs::write(&self.path, json)?;
        debug!("战绩已写入 {}", self.path.display());
        Ok(())
    }
}

impl PlayerStore for FileSystemPlayerStore {
    fn get_player_score(&self, name: &str) -> u32 {
        find_player(&self.league.read(), name).map_or(0, |p| p.wins)
    }

    // 先写文件，成功后才替换内存中的排行榜，写失败时内存保持原样
    fn record_win(&self, name: &str) -> Result<()> {
        let mut league = self.league.write();
        let mut updated = league.clone();
        match updated.iter_mut().find(|p| p.name == name) {
            Some(player) => player.wins += 1,
            None => updated.push(Player::new(name, 1)),
        }
        rank_league(&mut updated);
        self.persist(&updated)?;
        *league = updated;
        Ok(())
    }

    fn get_league(&self) -> League {
        self.league.read().clone()
    }
}

/// 指定战绩文件路径的环境变量，未设置时使用内存存储
pub const STORE_PATH_ENV: &str = "POKER_LEAGUE_DB";

/// 根据配置选择存储实现：给了路径就用文件，否则用内存
pub fn open_player_store(path: Option<&Path>) -> Result<Arc<dyn PlayerStore>> {
    match path {
        Some(path) => Ok(Arc::new(FileSystemPlayerStore::open(path)?)),
        None => {
            info!("未配置战绩文件，使用内存存储");
            Ok(Arc::new(InMemoryPlayerStore::new()))
        }
    }
}
