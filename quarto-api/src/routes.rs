//! HTTP endpoints over the shared game.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::{debug, warn};

use quarto_core::{generate, Attribute, Game, GameError};

use crate::models::{
    game_to_model, ErrorModel, GameStateModel, HealthModel, PieceModel, PlaceRequest, RulesModel,
    SelectRequest, RULES,
};

/// Shared application state
pub struct AppStateInner {
    game: Mutex<Game>,
}

pub type AppState = Arc<AppStateInner>;

type ApiError = (StatusCode, Json<ErrorModel>);

pub fn new_state() -> AppState {
    Arc::new(AppStateInner {
        game: Mutex::new(Game::new()),
    })
}

impl AppStateInner {
    /// Every transition is atomic, so a game behind a poisoned lock is
    /// still consistent.
    fn game(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(|poisoned| {
            warn!("recovering game state from poisoned lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

fn bad_request(detail: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorModel {
            kind: "bad_request".to_string(),
            detail,
        }),
    )
}

fn rejected(err: GameError) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorModel::from(err)))
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let game = state.game();
    Json(game_to_model(&game))
}

async fn get_pieces() -> Json<Vec<PieceModel>> {
    Json(generate().into_iter().map(PieceModel::from).collect())
}

async fn select_piece(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<GameStateModel>, ApiError> {
    let mut game = state.game();
    debug!("select piece {}", req.piece_id);
    game.select_piece_for_opponent(req.piece_id)
        .map_err(rejected)?;
    Ok(Json(game_to_model(&game)))
}

async fn place_piece(
    State(state): State<AppState>,
    Json(req): Json<PlaceRequest>,
) -> Result<Json<GameStateModel>, ApiError> {
    let cell = req.cell().map_err(bad_request)?;
    let mut game = state.game();
    debug!("place at cell {}", cell);
    game.place_piece(cell).map_err(rejected)?;
    Ok(Json(game_to_model(&game)))
}

async fn reset_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let mut game = state.game();
    game.reset();
    Json(game_to_model(&game))
}

async fn rules() -> Json<RulesModel> {
    Json(RulesModel {
        attributes: Attribute::ALL.iter().map(|attr| attr.to_string()).collect(),
        rules: RULES.iter().map(|rule| rule.to_string()).collect(),
    })
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game", get(get_game))
        .route("/pieces", get(get_pieces))
        .route("/select", post(select_piece))
        .route("/place", post(place_piece))
        .route("/reset", post(reset_game))
        .route("/rules", get(rules))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn select(state: &AppState, piece_id: u8) -> Result<Json<GameStateModel>, ApiError> {
        select_piece(State(state.clone()), Json(SelectRequest { piece_id })).await
    }

    async fn place(state: &AppState, cell: u8) -> Result<Json<GameStateModel>, ApiError> {
        let req = PlaceRequest {
            cell: Some(cell),
            ..Default::default()
        };
        place_piece(State(state.clone()), Json(req)).await
    }

    #[tokio::test]
    async fn test_select_then_place() {
        let state = new_state();

        let Json(model) = select(&state, 6).await.unwrap();
        assert_eq!(model.phase, "placing");
        assert_eq!(model.selected.map(|p| p.id), Some(6));

        let Json(model) = place(&state, 5).await.unwrap();
        assert_eq!(model.phase, "selecting");
        assert_eq!(model.current_player, 2);
        assert_eq!(model.board[1][1].piece.as_ref().map(|p| p.id), Some(6));
        assert_eq!(model.available.len(), 15);
    }

    #[tokio::test]
    async fn test_engine_rejection_is_bad_request() {
        let state = new_state();
        select(&state, 1).await.unwrap();

        let (status, Json(body)) = select(&state, 2).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, "invalid_selection");

        let Json(model) = get_game(State(state.clone())).await;
        assert_eq!(model.selected.map(|p| p.id), Some(1));
    }

    #[tokio::test]
    async fn test_malformed_place_request() {
        let state = new_state();
        select(&state, 1).await.unwrap();

        let req = PlaceRequest {
            row: Some(9),
            col: Some(0),
            ..Default::default()
        };
        let (status, Json(body)) = place_piece(State(state.clone()), Json(req))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, "bad_request");
    }

    #[tokio::test]
    async fn test_win_then_reset() {
        let state = new_state();
        for (cell, id) in [(0, 4), (1, 5), (2, 6), (3, 7)] {
            select(&state, id).await.unwrap();
            place(&state, cell).await.unwrap();
        }

        let Json(model) = get_game(State(state.clone())).await;
        assert_eq!(model.result, "player_two_wins");

        let (_, Json(body)) = select(&state, 0).await.unwrap_err();
        assert_eq!(body.kind, "invalid_selection");

        let Json(model) = reset_game(State(state.clone())).await;
        assert_eq!(model.result, "ongoing");
        assert_eq!(model.available.len(), 16);
        assert_eq!(model.filled, 0);
    }

    #[tokio::test]
    async fn test_static_endpoints() {
        let Json(pieces) = get_pieces().await;
        assert_eq!(pieces.len(), 16);
        assert_eq!(pieces[15].code, "TDSH");

        let Json(rules) = rules().await;
        assert_eq!(rules.attributes, vec!["tall", "dark", "square", "hole"]);
        assert_eq!(rules.rules.len(), RULES.len());

        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
    }
}
