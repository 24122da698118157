//! # MongoDB
//!
//! Remote document store holding one collection of translations.
//!
//! ## Requirements
//!
//! - Schema-flexible documents, one per saved translation
//! - Lookup by user id, mutation by ObjectId + user id
//! - Partial updates that touch only the supplied fields
//!
//! ## Implementation
//!
//! - One `Collection<Translation>` handle created at startup and cloned into
//!   every handler through the shared state
//! - The driver connects lazily and pools internally, so no retry or timeout
//!   policy lives here
//! - Mutations filter on both `_id` and `user_id`; a wrong user id looks
//!   exactly like a missing document
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{config::Config, error::AppError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub original: String,
    pub translated: String,
}

pub async fn init_mongo(config: &Config) -> Collection<Translation> {
    let client = Client::with_uri_str(&config.mongo_url).await.unwrap();
    let database = client.database(&config.mongo_database);

    match database.run_command(doc! { "ping": 1 }).await {
        Ok(_) => info!("Connected to MongoDB"),
        Err(e) => warn!("MongoDB unreachable, requests will fail until it is back: {e}"),
    }

    database.collection(&config.mongo_collection)
}

pub async fn insert_translation(
    translations: &Collection<Translation>,
    user_id: &str,
    original: String,
    translated: String,
) -> Result<ObjectId, AppError> {
    let id = ObjectId::new();

    translations
        .insert_one(Translation {
            id: Some(id),
            user_id: user_id.to_string(),
            original,
            translated,
        })
        .await?;

    Ok(id)
}

pub async fn find_translations(
    translations: &Collection<Translation>,
    user_id: &str,
) -> Result<Vec<Translation>, AppError> {
    let cursor = translations.find(doc! { "user_id": user_id }).await?;

    Ok(cursor.try_collect().await?)
}

/// Applies a partial `$set`, returning whether any document matched.
pub async fn update_translation(
    translations: &Collection<Translation>,
    user_id: &str,
    id: ObjectId,
    fields: Document,
) -> Result<bool, AppError> {
    let result = translations
        .update_one(
            doc! { "_id": id, "user_id": user_id },
            doc! { "$set": fields },
        )
        .await?;

    Ok(result.matched_count > 0)
}

pub async fn delete_translation(
    translations: &Collection<Translation>,
    user_id: &str,
    id: ObjectId,
) -> Result<bool, AppError> {
    let result = translations
        .delete_one(doc! { "_id": id, "user_id": user_id })
        .await?;

    Ok(result.deleted_count > 0)
}
