//! Upload surface for the service's file store.
//!
//! Uploaded bytes become an opaque [`FileHandle`] that requests reference in
//! place of re-sending the raw data. Size and MIME correctness are the
//! service's to enforce; this module forwards what it is given.

use rattan_core::{FileHandle, FileState};
use serde::Deserialize;

use crate::client::{status_error, Client};
use crate::error::{ClientError, Result, WireError};

/// File resource as the service reports it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    name: String,
    uri: String,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

impl FileResource {
    fn into_handle(self) -> FileHandle {
        let state = match self.state.as_deref() {
            Some("PROCESSING") => FileState::Processing,
            Some("FAILED") => FileState::Failed,
            _ => FileState::Active,
        };
        FileHandle {
            name: self.name,
            uri: self.uri,
            mime_type: self.mime_type.unwrap_or_default(),
            state,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: FileResource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilesResponse {
    #[serde(default)]
    files: Vec<FileResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// One page of uploaded files
#[derive(Debug)]
pub struct FileList {
    pub files: Vec<FileHandle>,
    pub next_page_token: Option<String>,
}

impl Client {
    /// Upload raw bytes and get back an opaque handle to reference them.
    ///
    /// Uses the service's resumable upload handshake: a start request
    /// declaring length and MIME type, then a single upload-and-finalize
    /// request with the bytes against the session URL from the reply.
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<FileHandle> {
        let mime_type = mime_type.into();
        let display_name = display_name.into();

        let start = self
            .http
            .post(self.config.upload_url())
            .headers(self.build_headers()?)
            .header("x-goog-upload-protocol", "resumable")
            .header("x-goog-upload-command", "start")
            .header("x-goog-upload-header-content-length", bytes.len().to_string())
            .header("x-goog-upload-header-content-type", &mime_type)
            .json(&serde_json::json!({ "file": { "display_name": display_name } }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !start.status().is_success() {
            return Err(status_error(start).await);
        }

        let upload_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                ClientError::Wire(WireError::MissingField("x-goog-upload-url".to_string()))
            })?;

        log::debug!("uploading {} bytes as {}", bytes.len(), display_name);

        let finalize = self
            .http
            .post(&upload_url)
            .headers(self.build_headers()?)
            .header("x-goog-upload-command", "upload, finalize")
            .header("x-goog-upload-offset", "0")
            .body(bytes)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !finalize.status().is_success() {
            return Err(status_error(finalize).await);
        }

        let data: UploadResponse = finalize
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(data.file.into_handle())
    }

    /// Fetch the current state of an uploaded file by resource name
    /// (`files/<id>`)
    pub async fn get_file(&self, name: &str) -> Result<FileHandle> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), name);

        let response = self
            .http
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let resource: FileResource = response
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(resource.into_handle())
    }

    /// List uploaded files, newest first
    pub async fn list_files(&self, page_size: Option<u32>) -> Result<FileList> {
        let url = format!("{}/files", self.config.base_url.trim_end_matches('/'));

        let mut request = self.http.get(&url).headers(self.build_headers()?);
        if let Some(size) = page_size {
            request = request.query(&[("pageSize", size)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let data: ListFilesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(FileList {
            files: data.files.into_iter().map(FileResource::into_handle).collect(),
            next_page_token: data.next_page_token,
        })
    }

    /// Delete an uploaded file by resource name
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), name);

        let response = self
            .http
            .delete(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_into_handle() {
        let resource = FileResource {
            name: "files/abc123".to_string(),
            uri: "https://example.com/v1beta/files/abc123".to_string(),
            mime_type: Some("audio/mp4".to_string()),
            state: Some("PROCESSING".to_string()),
        };

        let handle = resource.into_handle();
        assert_eq!(handle.name, "files/abc123");
        assert_eq!(handle.mime_type, "audio/mp4");
        assert_eq!(handle.state, FileState::Processing);
        assert!(!handle.is_active());
    }

    #[test]
    fn test_resource_state_defaults_to_active() {
        let resource = FileResource {
            name: "files/x".to_string(),
            uri: "https://example.com/v1beta/files/x".to_string(),
            mime_type: None,
            state: None,
        };
        assert_eq!(resource.into_handle().state, FileState::Active);
    }

    #[test]
    fn test_parse_upload_response() {
        let body = r#"{
            "file": {
                "name": "files/abc123",
                "displayName": "sample.mp4",
                "mimeType": "audio/mp4",
                "uri": "https://example.com/v1beta/files/abc123",
                "state": "ACTIVE"
            }
        }"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        let handle = parsed.file.into_handle();
        assert_eq!(handle.uri, "https://example.com/v1beta/files/abc123");
        assert!(handle.is_active());
    }
}
