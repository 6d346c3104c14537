//! Google Drive API client for folder listing.

use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use tracing::trace;

use crate::auth::Authenticator;
use crate::error::{DriveError, Result};
use crate::ids::extract_id;
use crate::models::{ApiErrorResponse, FileListResponse, FileNameResponse};

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Which namespace requests are issued against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DriveScope {
    /// The caller's own "My Drive".
    #[default]
    Personal,
    /// A shared drive, identified by its drive ID.
    Shared(String),
}

impl DriveScope {
    /// Empty input means the personal namespace; anything else must resolve
    /// to a drive ID.
    pub fn parse(drive: &str) -> Result<Self> {
        if drive.trim().is_empty() {
            Ok(DriveScope::Personal)
        } else {
            extract_id(drive).map(DriveScope::Shared)
        }
    }
}

/// Options for a single `files.list` page.
#[derive(Debug, Clone, Default)]
pub struct ListRequest<'a> {
    pub query: &'a str,
    pub fields: &'a str,
    pub page_token: Option<&'a str>,
    pub page_size: u32,
}

/// The two remote operations a tree walk needs.
pub trait DriveListing {
    /// Display name of a single object.
    fn fetch_name(
        &self,
        file_id: &str,
        scope: &DriveScope,
    ) -> impl Future<Output = Result<String>> + Send;

    /// One page of objects matching `request.query`.
    fn list_children(
        &self,
        scope: &DriveScope,
        request: &ListRequest<'_>,
    ) -> impl Future<Output = Result<FileListResponse>> + Send;
}

/// REST client for Drive v3.
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    base_url: String,
}

impl DriveClient {
    /// Create a client against the public Drive endpoint.
    pub fn new(auth: Authenticator) -> Self {
        Self::with_base_url(auth, DRIVE_API_BASE)
    }

    /// Create a client against another endpoint, e.g. a local mock.
    pub fn with_base_url(auth: Authenticator, base_url: impl Into<String>) -> Self {
        Self {
            auth,
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the display name of a file or folder.
    pub async fn get_file_name(&self, file_id: &str, scope: &DriveScope) -> Result<String> {
        let token = self.auth.get_access_token().await?;

        let mut request = self
            .http
            .get(format!("{}/files/{}", self.base_url, file_id))
            .bearer_auth(&token)
            .query(&[("fields", "name")]);

        if let DriveScope::Shared(_) = scope {
            request = request.query(&[("supportsAllDrives", "true")]);
        }

        let response = send_checked(request).await?;
        let body: FileNameResponse = response.json().await?;
        Ok(body.name)
    }

    /// Fetch one page of a `files.list` query.
    pub async fn list_files(
        &self,
        scope: &DriveScope,
        list: &ListRequest<'_>,
    ) -> Result<FileListResponse> {
        let token = self.auth.get_access_token().await?;

        let mut request = self
            .http
            .get(format!("{}/files", self.base_url))
            .bearer_auth(&token)
            .query(&[("q", list.query), ("fields", list.fields)])
            .query(&[("pageSize", list.page_size)]);

        if let Some(page_token) = list.page_token {
            request = request.query(&[("pageToken", page_token)]);
        }

        if let DriveScope::Shared(drive_id) = scope {
            request = request.query(&[
                ("corpora", "drive"),
                ("includeItemsFromAllDrives", "true"),
                ("supportsAllDrives", "true"),
                ("driveId", drive_id.as_str()),
            ]);
        }

        let response = send_checked(request).await?;
        let page: FileListResponse = response.json().await?;
        trace!(files = page.files.len(), "received files.list page");
        Ok(page)
    }
}

impl DriveListing for DriveClient {
    async fn fetch_name(&self, file_id: &str, scope: &DriveScope) -> Result<String> {
        self.get_file_name(file_id, scope).await
    }

    async fn list_children(
        &self,
        scope: &DriveScope,
        request: &ListRequest<'_>,
    ) -> Result<FileListResponse> {
        self.list_files(scope, request).await
    }
}

/// Send a request and turn a non-2xx status into [`DriveError::ApiError`],
/// preferring the message from Google's error envelope.
async fn send_checked(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
        return Err(DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        });
    }
    Err(DriveError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}
