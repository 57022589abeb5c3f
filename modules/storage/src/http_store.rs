// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::check_file_name;
use async_trait::async_trait;
use module_core::{FileStore, StoreError};
use reqwest::{Client, Response, StatusCode, Url, multipart};
use serde::Deserialize;
use tracing::{debug, error, info};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    filename: String,
}

/// A [`FileStore`] backed by a remote uploads server.
///
/// The server provides the uploads collection under `/uploads/`:
/// - `GET /uploads/` lists the file names as a JSON array.
/// - `POST /uploads/` stores the multipart field `file`.
/// - `GET /uploads/{name}` returns the file content.
/// - `DELETE /uploads/{name}` deletes the file.
///
/// Error responses carry a JSON body with a `detail` message. A `404` is
/// reported as [`StoreError::NotFound`], a `400` as [`StoreError::InvalidData`]
/// and every other failure as [`StoreError::Http`].
pub struct HttpFileStore {
    client: Client,
    base_url: Url,
}

impl HttpFileStore {
    /// Creates a client for the server at `base_url`, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url).map_err(|e| StoreError::Http {
            status: None,
            message: format!("invalid server url \"{base_url}\": {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Http {
                status: None,
                message: format!("invalid server url \"{base_url}\""),
            });
        }
        info!("Using uploads server: {base_url}");
        Ok(HttpFileStore {
            client: Client::new(),
            base_url,
        })
    }

    /// Builds the url of `/uploads/{name}`. An empty `name` yields the collection url.
    pub fn uploads_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("uploads").push(name);
        }
        url
    }
}

fn request_error(e: reqwest::Error) -> StoreError {
    error!("Request to uploads server failed. Error: {e}");
    StoreError::Http {
        status: e.status().map(|status| status.as_u16()),
        message: e.to_string(),
    }
}

/// Passes successful responses through and turns every other one into a [`StoreError`].
async fn check_status(response: Response, name: &str) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| status.to_string());
    debug!("Uploads server answered {status} for \"{name}\": {message}");
    Err(match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(name.to_string()),
        StatusCode::BAD_REQUEST => StoreError::InvalidData(message),
        _ => StoreError::Http {
            status: Some(status.as_u16()),
            message,
        },
    })
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .client
            .get(self.uploads_url(""))
            .send()
            .await
            .map_err(request_error)?;
        let mut files: Vec<String> = check_status(response, "")
            .await?
            .json()
            .await
            .map_err(request_error)?;
        files.sort();
        debug!("Uploads server lists {} files", files.len());
        Ok(files)
    }

    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StoreError> {
        check_file_name(filename)?;
        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str("application/gpx+xml")
            .map_err(request_error)?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.uploads_url(""))
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        let uploaded: UploadResponse = check_status(response, filename)
            .await?
            .json()
            .await
            .map_err(request_error)?;
        info!("Uploaded {filename} as {}", uploaded.filename);
        Ok(uploaded.filename)
    }

    async fn fetch(&self, id: &str) -> Result<String, StoreError> {
        check_file_name(id)?;
        let response = self
            .client
            .get(self.uploads_url(id))
            .send()
            .await
            .map_err(request_error)?;
        check_status(response, id)
            .await?
            .text()
            .await
            .map_err(request_error)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        check_file_name(id)?;
        let response = self
            .client
            .delete(self.uploads_url(id))
            .send()
            .await
            .map_err(request_error)?;
        check_status(response, id).await?;
        info!("Deleted {id} on the uploads server");
        Ok(())
    }
}
