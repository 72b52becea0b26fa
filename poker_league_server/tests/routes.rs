// 战绩接口与静态页面的集成测试
//
// 每个测试在随机端口上启动一个真实的服务器，用 HTTP 客户端访问。
// 存储和对局都注入测试替身，所以这里只验证路由层的行为。

use std::net::SocketAddr;
use std::sync::Arc;

use poker_league_core::testing::{GameSpy, StubPlayerStore};
use poker_league_core::{Game, Player, PlayerStore};
use poker_league_server::{serve, AppState, GameFactory, SharedState};

/// 启动服务器并返回它实际监听的地址
async fn start_server(store: Arc<dyn PlayerStore>) -> SocketAddr {
    let game: Arc<dyn Game> = Arc::new(GameSpy::new());
    let new_game: GameFactory = Arc::new(move || game.clone());
    let state = SharedState::new(AppState::new(store, new_game));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, state));
    addr
}

fn pepper_and_floyd() -> Arc<StubPlayerStore> {
    Arc::new(StubPlayerStore::with_scores([("Pepper", 20), ("Floyd", 10)]))
}

#[tokio::test]
async fn returns_pepper_score() {
    let addr = start_server(pepper_and_floyd()).await;

    let response = reqwest::get(format!("http://{addr}/players/Pepper")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "20");
}

#[tokio::test]
async fn returns_floyd_score() {
    let addr = start_server(pepper_and_floyd()).await;

    let response = reqwest::get(format!("http://{addr}/players/Floyd")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "10");
}

#[tokio::test]
async fn returns_404_on_missing_players() {
    let addr = start_server(pepper_and_floyd()).await;

    let response = reqwest::get(format!("http://{addr}/players/Apollo")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn records_wins_on_post() {
    let store = Arc::new(StubPlayerStore::default());
    let addr = start_server(store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/players/Pepper"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    assert_eq!(store.win_calls(), ["Pepper"]);
}

#[tokio::test]
async fn returns_league_table_as_json() {
    let wanted_league = vec![
        Player::new("Cleo", 32),
        Player::new("Chris", 20),
        Player::new("Tiest", 14),
    ];
    let addr = start_server(Arc::new(StubPlayerStore::with_league(wanted_league.clone()))).await;

    let response = reqwest::get(format!("http://{addr}/league")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );

    let body = response.text().await.unwrap();
    assert!(body.contains(r#""Name":"Cleo""#), "unexpected body {body}");
    let got: Vec<Player> = serde_json::from_str(&body).unwrap();
    assert_eq!(got, wanted_league);
}

#[tokio::test]
async fn get_game_returns_200() {
    let addr = start_server(Arc::new(StubPlayerStore::default())).await;

    let response = reqwest::get(format!("http://{addr}/game")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.text().await.unwrap().contains("/ws"));
}
