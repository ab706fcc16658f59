use std::path::PathBuf;

use serde_json::Value;

use crate::{catalog::Collection, error, success};

use super::common::{catalog_source, spinner};

async fn read_payload(path: &PathBuf) -> Value {
    let content = match async_fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) => error!("Cannot read {}. Err: {}", path.display(), e),
    };
    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => error!("{} is not valid JSON. Err: {}", path.display(), e),
    }
}

fn created_id(value: &Value) -> String {
    ["code", "id", "_id"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or("?")
        .to_string()
}

pub async fn create(collection: Collection, payload: PathBuf) {
    let payload = read_payload(&payload).await;
    let source = catalog_source();

    let pb = spinner(&format!("Creating entry in {}...", collection));
    let result: Result<Value, _> = source
        .client()
        .create(collection, &payload, source.token())
        .await;
    pb.finish_and_clear();

    match result {
        Ok(created) => success!("Created {} in {}", created_id(&created), collection),
        Err(e) => error!("Failed to create entry in {}. Err: {}", collection, e),
    }
}

pub async fn update(collection: Collection, id: String, payload: PathBuf) {
    let payload = read_payload(&payload).await;
    let source = catalog_source();

    let pb = spinner(&format!("Updating {}...", id));
    let result: Result<Value, _> = source
        .client()
        .update(collection, &id, &payload, source.token())
        .await;
    pb.finish_and_clear();

    match result {
        Ok(_) => success!("Updated {} in {}", id, collection),
        Err(e) if e.is_not_found() => error!("{} does not exist in {}", id, collection),
        Err(e) => error!("Failed to update {}. Err: {}", id, e),
    }
}

pub async fn delete(collection: Collection, id: String) {
    let source = catalog_source();

    let pb = spinner(&format!("Deleting {}...", id));
    let result = source.client().delete(collection, &id, source.token()).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => success!("Deleted {} from {}", id, collection),
        Err(e) if e.is_not_found() => error!("{} does not exist in {}", id, collection),
        Err(e) => error!("Failed to delete {}. Err: {}", id, e),
    }
}
