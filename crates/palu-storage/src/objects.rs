//! Object access within a single bucket.

use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body and ETag of a fetched object.
pub struct Fetched {
    pub body: Vec<u8>,
    pub etag: String,
}

/// Condition a write must satisfy to be applied.
#[derive(Debug, Clone, Copy)]
pub enum Precondition<'a> {
    /// No object exists at the key (`If-None-Match: *`).
    Absent,
    /// The stored object still has this ETag (`If-Match`).
    Matches(&'a str),
}

#[derive(Clone)]
pub struct Bucket {
    client: Client,
    name: String,
}

impl Bucket {
    pub fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn fetch(&self, key: &str) -> Result<Fetched, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                err if err.is_no_such_key() => StorageError::NotFound {
                    key: key.to_string(),
                },
                err => StorageError::GetObject(err.to_string()),
            })?;

        let etag = output.e_tag().unwrap_or_default().to_string();
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::GetObject(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(Fetched { body, etag })
    }

    /// Write a JSON body under `precondition`. Returns the new ETag.
    pub async fn put_json(
        &self,
        key: &str,
        body: Vec<u8>,
        precondition: Precondition<'_>,
    ) -> Result<String, StorageError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.name)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(body));
        let request = match precondition {
            Precondition::Absent => request.if_none_match("*"),
            Precondition::Matches(etag) => request.if_match(etag),
        };

        let output = request.send().await.map_err(|e| {
            let err = e.into_service_error();
            // 409 ConditionalRequestConflict: a competing conditional write
            // to the same key is still in flight.
            match err.code() {
                Some("PreconditionFailed" | "ConditionalRequestConflict") => {
                    StorageError::PreconditionFailed {
                        key: key.to_string(),
                    }
                }
                _ => StorageError::PutObject(err.to_string()),
            }
        })?;

        Ok(output.e_tag().unwrap_or_default().to_string())
    }

    /// Every key under `prefix`, across all result pages.
    pub async fn keys_under(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.name)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );
        }
        Ok(keys)
    }
}
