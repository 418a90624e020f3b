use serde::{Serialize, de::DeserializeOwned};

use palu_triage::store::Versioned;

use crate::error::StorageError;
use crate::objects::{Bucket, Precondition};

/// Read a JSON document, versioned by its ETag.
pub async fn load_json<T: DeserializeOwned>(
    bucket: &Bucket,
    key: &str,
) -> Result<Versioned<T>, StorageError> {
    let fetched = bucket.fetch(key).await?;
    Ok(Versioned {
        value: serde_json::from_slice(&fetched.body)?,
        version: fetched.etag,
    })
}

/// Write a JSON document under `precondition`. Returns the new ETag.
pub async fn store_json<T: Serialize>(
    bucket: &Bucket,
    key: &str,
    value: &T,
    precondition: Precondition<'_>,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    bucket.put_json(key, body, precondition).await
}
