use mongodb::bson::{Document, oid::ObjectId};

use crate::{error::AppError, routes::UpdateTranslation};

/// Shape check only. Whether a document with this id exists is a separate
/// question answered by the database call.
pub fn parse_translation_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::MalformedId)
}

/// Builds the `$set` document from the supplied fields, rejecting an update
/// that carries neither before any storage call happens.
pub fn update_fields(payload: &UpdateTranslation) -> Result<(Document, Vec<String>), AppError> {
    let mut fields = Document::new();
    let mut updated = Vec::new();

    if let Some(original) = &payload.original {
        fields.insert("original", original.as_str());
        updated.push("original".to_string());
    }

    if let Some(translated) = &payload.translated {
        fields.insert("translated", translated.as_str());
        updated.push("translated".to_string());
    }

    if fields.is_empty() {
        return Err(AppError::EmptyUpdate);
    }

    Ok((fields, updated))
}
