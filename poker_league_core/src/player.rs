use serde::{Deserialize, Serialize};

/// 排行榜中的一名玩家
///
/// 序列化为 `{"Name": ..., "Wins": ...}`，与 `/league` 接口约定一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u32) -> Self {
        Player { name: name.into(), wins }
    }
}

/// 所有已知玩家的战绩快照，按需生成，不做保留
pub type League = Vec<Player>;

/// 按胜场降序、同胜场按名字升序排列，保证输出顺序稳定
pub fn rank_league(league: &mut League) {
    league.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
}

/// 在排行榜中按名字查找玩家
pub fn find_player<'a>(league: &'a [Player], name: &str) -> Option<&'a Player> {
    league.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_json_uses_pascal_case() {
        let json = serde_json::to_string(&Player::new("Cleo", 32)).unwrap();
        assert_eq!(json, r#"{"Name":"Cleo","Wins":32}"#);

        let back: Player = serde_json::from_str(r#"{"Name":"Chris","Wins":20}"#).unwrap();
        assert_eq!(back, Player::new("Chris", 20));
    }

    #[test]
    fn test_rank_league_orders_by_wins_then_name() {
        let mut league = vec![
            Player::new("Tiest", 14),
            Player::new("Chris", 20),
            Player::new("Alice", 14),
            Player::new("Cleo", 32),
        ];
        rank_league(&mut league);
        let names: Vec<_> = league.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Cleo", "Chris", "Alice", "Tiest"]);
    }

    #[test]
    fn test_find_player() {
        let league = vec![Player::new("Cleo", 32), Player::new("Chris", 20)];
        assert_eq!(find_player(&league, "Chris").map(|p| p.wins), Some(20));
        assert!(find_player(&league, "Apollo").is_none());
    }
}
