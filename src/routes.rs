use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    database::{delete_translation, find_translations, insert_translation, update_translation},
    error::AppError,
    state::AppState,
    utils::{parse_translation_id, update_fields},
};

/// Fixed identity for mutations until real accounts exist. The list endpoint
/// already takes an explicit user id.
pub const DEFAULT_USER_ID: &str = "usuario123";

#[derive(Deserialize)]
pub struct SaveTranslation {
    pub original: String,
    pub translated: String,
}

#[derive(Deserialize)]
pub struct UpdateTranslation {
    pub original: Option<String>,
    pub translated: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: String,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub id: String,
    pub updated_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct TranslationEntry {
    pub id: String,
    pub original: String,
    pub translated: String,
}

pub async fn save_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveTranslation>,
) -> Result<impl IntoResponse, AppError> {
    let id = insert_translation(
        &state.translations,
        DEFAULT_USER_ID,
        payload.original,
        payload.translated,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Tradução salva com sucesso!".to_string(),
            id: id.to_hex(),
        }),
    ))
}

pub async fn translations_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<TranslationEntry>>, AppError> {
    let translations = find_translations(&state.translations, &user_id).await?;

    Ok(Json(
        translations
            .into_iter()
            .map(|translation| TranslationEntry {
                id: translation.id.map_or_else(String::new, |id| id.to_hex()),
                original: translation.original,
                translated: translation.translated,
            })
            .collect(),
    ))
}

pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTranslation>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let id = parse_translation_id(&id)?;
    let (fields, updated_fields) = update_fields(&payload)?;

    if !update_translation(&state.translations, DEFAULT_USER_ID, id, fields).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(UpdatedResponse {
        message: "Tradução atualizada com sucesso!".to_string(),
        id: id.to_hex(),
        updated_fields,
    }))
}

pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_translation_id(&id)?;

    if !delete_translation(&state.translations, DEFAULT_USER_ID, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Tradução removida com sucesso!".to_string(),
        id: id.to_hex(),
    }))
}
