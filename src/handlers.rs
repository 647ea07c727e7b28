use crate::errors::AppError;
use crate::models::{Audience, Combo, ComboDetail, Greeting, NewCombo, NewText};
use crate::state::AppState;
use crate::ui::{render_index, APP_JS};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};

type Created<T> = (StatusCode, Json<T>);

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.api_base.as_deref()))
}

pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

pub async fn list_greetings(State(state): State<AppState>) -> Result<Json<Vec<Greeting>>, AppError> {
    let db = state.database()?;
    let rows = db.with_session(|session| session.list_greetings()).await?;
    Ok(Json(rows))
}

pub async fn create_greeting(
    State(state): State<AppState>,
    payload: Result<Json<NewText>, JsonRejection>,
) -> Result<Created<Greeting>, AppError> {
    let db = state.database()?;
    let Json(NewText { text }) = payload?;
    let row = db
        .with_session(move |session| session.insert_greeting(text.as_deref()))
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn list_audiences(State(state): State<AppState>) -> Result<Json<Vec<Audience>>, AppError> {
    let db = state.database()?;
    let rows = db.with_session(|session| session.list_audiences()).await?;
    Ok(Json(rows))
}

pub async fn create_audience(
    State(state): State<AppState>,
    payload: Result<Json<NewText>, JsonRejection>,
) -> Result<Created<Audience>, AppError> {
    let db = state.database()?;
    let Json(NewText { text }) = payload?;
    let row = db
        .with_session(move |session| session.insert_audience(text.as_deref()))
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn list_combos(State(state): State<AppState>) -> Result<Json<Vec<ComboDetail>>, AppError> {
    let db = state.database()?;
    let rows = db.with_session(|session| session.list_combos()).await?;
    Ok(Json(rows))
}

pub async fn create_combo(
    State(state): State<AppState>,
    payload: Result<Json<NewCombo>, JsonRejection>,
) -> Result<Created<Combo>, AppError> {
    let db = state.database()?;
    let Json(NewCombo {
        greeting_id,
        audience_id,
    }) = payload?;
    let row = db
        .with_session(move |session| session.insert_combo(greeting_id, audience_id))
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Unknown paths and methods. A missing database still wins over the 404.
pub async fn not_found(State(state): State<AppState>) -> AppError {
    match state.database() {
        Ok(_) => AppError::not_found(),
        Err(err) => err,
    }
}
