//! Response shaping for schemaless documents.

use futures::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::results::InsertOneResult;
use serde_json::Value;
use service_core::error::AppError;

/// Render a BSON document as plain JSON, with `_id` as its hex string rather
/// than the extended-JSON `{"$oid": ...}` form clients would otherwise see.
pub fn document_to_json(document: Document) -> Value {
    let mut value = Bson::Document(document).into_relaxed_extjson();
    if let Some(fields) = value.as_object_mut() {
        let hex = fields
            .get("_id")
            .and_then(|id| id.get("$oid"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        if let Some(hex) = hex {
            fields.insert("_id".to_string(), Value::String(hex));
        }
    }
    value
}

/// Drain a cursor into a JSON array.
pub async fn collect_documents(
    mut cursor: mongodb::Cursor<Document>,
) -> Result<Vec<Value>, AppError> {
    let mut documents = Vec::new();
    while let Some(document) = cursor.try_next().await? {
        documents.push(document_to_json(document));
    }
    Ok(documents)
}

/// The database-assigned identifier of a fresh insert, as a hex string.
pub fn inserted_id_hex(result: &InsertOneResult) -> String {
    match &result.inserted_id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}
