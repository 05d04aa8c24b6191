use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use domain::{ApiResponse, Comment, CommentInput};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_sort() -> String {
    "desc".to_string()
}

// 鉴权失败直接用 HTTP 401/403 顶回去，不进业务信封
fn require_token(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    state
        .auth
        .verify(header)
        .map(|_| ())
        .map_err(|e| (e.status(), e.to_string()))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Comment>>> {
    Json(state.service.list(&query.sort).await)
}

pub async fn post_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CommentInput>,
) -> Result<Json<ApiResponse<Comment>>, (StatusCode, String)> {
    require_token(&state, &headers)?;
    Ok(Json(state.service.create(payload).await))
}

pub async fn update_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<CommentInput>,
) -> Result<Json<ApiResponse<Comment>>, (StatusCode, String)> {
    require_token(&state, &headers)?;
    Ok(Json(state.service.update(id, payload).await))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Comment>>, (StatusCode, String)> {
    require_token(&state, &headers)?;
    Ok(Json(state.service.delete(id).await))
}
