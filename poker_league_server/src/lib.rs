//! 扑克联赛服务器：战绩查询接口、静态游戏页面和实时对局的 WebSocket 入口

pub mod config;
pub mod live;

use std::sync::Arc;

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use poker_league_core::{BlindAlerter, Game, PlayerStore, TexasHoldem};

/// 实时前端的入口页面
pub const GAME_PAGE: &str = include_str!("../static/game.html");

/// 每条实时连接都用它创建一局新游戏
pub type GameFactory = Arc<dyn Fn() -> Arc<dyn Game> + Send + Sync>;

/// 服务器全局状态
pub struct AppState {
    store: Arc<dyn PlayerStore>,
    new_game: GameFactory,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: Arc<dyn PlayerStore>, new_game: GameFactory) -> Self {
        AppState { store, new_game }
    }

    /// 生产环境的组合：每条连接一局 `TexasHoldem`，共用同一个存储和定时器
    pub fn texas_holdem(store: Arc<dyn PlayerStore>, alerter: Arc<dyn BlindAlerter>) -> Self {
        let game_store = store.clone();
        let new_game: GameFactory = Arc::new(move || -> Arc<dyn Game> {
            Arc::new(TexasHoldem::new(alerter.clone(), game_store.clone()))
        });
        Self::new(store, new_game)
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/players/{name}", get(get_score).post(record_win))
        .route("/league", get(get_league))
        .route("/game", get(game_page))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// 在给定的监听器上运行服务器，直到出错
pub async fn serve(listener: TcpListener, state: SharedState) -> std::io::Result<()> {
    info!("服务器正在监听 {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

async fn get_score(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.store.get_player_score(&name) {
        0 => StatusCode::NOT_FOUND.into_response(),
        score => score.to_string().into_response(),
    }
}

async fn record_win(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.store.record_win(&name) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            warn!("记录 {} 的胜场失败: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn get_league(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.store.get_league())
}

async fn game_page() -> Html<&'static str> {
    Html(GAME_PAGE)
}

/// 处理 WebSocket 连接请求
async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let game = (state.new_game)();
    ws.on_upgrade(move |socket| live::handle_socket(socket, game))
}
