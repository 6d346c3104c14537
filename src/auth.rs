//! Bearer token acquisition for the Drive API.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DriveError, Result};
use crate::models::{ServiceAccountCredentials, TokenResponse};

/// Google OAuth2 token endpoint, used when the key file names none.
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Read-only Drive scope; the tree walk never mutates anything.
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Tokens this close to expiry are refreshed.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// JWT claims for service account authentication.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,   // Issuer (service account email)
    scope: String, // OAuth scope
    aud: String,   // Audience (token endpoint)
    exp: u64,      // Expiration time
    iat: u64,      // Issued at
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: OffsetDateTime,
}

#[derive(Clone)]
enum TokenSource {
    ServiceAccount {
        credentials: Arc<ServiceAccountCredentials>,
        cached_token: Arc<RwLock<Option<CachedToken>>>,
    },
    Static(String),
}

/// Supplies OAuth bearer tokens, either pre-issued or minted from a
/// service account key.
#[derive(Clone)]
pub struct Authenticator {
    source: TokenSource,
    client: Client,
}

impl Authenticator {
    /// Create an authenticator from a service account JSON key file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let credentials: ServiceAccountCredentials = serde_json::from_str(&content)?;
        Ok(Self::new(credentials))
    }

    /// Create an authenticator from service account credentials.
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self {
            source: TokenSource::ServiceAccount {
                credentials: Arc::new(credentials),
                cached_token: Arc::new(RwLock::new(None)),
            },
            client: Client::new(),
        }
    }

    /// Use an already issued access token as-is.
    pub fn from_access_token(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
            client: Client::new(),
        }
    }

    /// Pick credentials from what the environment provided. A static token
    /// wins over a key file.
    pub fn from_environment(
        access_token: Option<String>,
        credentials_file: Option<&Path>,
    ) -> Result<Self> {
        match (access_token.filter(|t| !t.is_empty()), credentials_file) {
            (Some(token), _) => Ok(Self::from_access_token(token)),
            (None, Some(path)) => Self::from_file(path),
            (None, None) => Err(DriveError::AuthenticationError(
                "no credentials: set GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_OAUTH_ACCESS_TOKEN"
                    .to_string(),
            )),
        }
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        let (credentials, cached_token) = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::ServiceAccount {
                credentials,
                cached_token,
            } => (credentials, cached_token),
        };

        {
            let cached = cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > OffsetDateTime::now_utc() + EXPIRY_MARGIN {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let new_token = self.refresh_token(credentials).await?;
        *cached_token.write().await = Some(new_token.clone());

        Ok(new_token.access_token)
    }

    /// Exchange a signed JWT assertion for an access token.
    async fn refresh_token(&self, credentials: &ServiceAccountCredentials) -> Result<CachedToken> {
        let token_uri = credentials.token_uri.as_deref().unwrap_or(TOKEN_URI);
        let now = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;

        let claims = Claims {
            iss: credentials.client_email.clone(),
            scope: DRIVE_SCOPE.to_string(),
            aud: token_uri.to_string(),
            iat: now,
            exp: now + 3600,
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;
        let jwt = encode(&header, &claims, &key)?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &jwt),
        ];

        debug!(client_email = %credentials.client_email, "refreshing access token");
        let response = self.client.post(token_uri).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at: OffsetDateTime::now_utc()
                + Duration::from_secs(token_response.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialization() {
        let claims = Claims {
            iss: "test@example.iam.gserviceaccount.com".to_string(),
            scope: DRIVE_SCOPE.to_string(),
            aud: TOKEN_URI.to_string(),
            iat: 1234567890,
            exp: 1234571490,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("test@example.iam.gserviceaccount.com"));
        assert!(json.contains("drive.readonly"));
    }

    #[tokio::test]
    async fn test_static_token_is_returned_verbatim() {
        let auth = Authenticator::from_access_token("ya29.token");
        assert_eq!(auth.get_access_token().await.unwrap(), "ya29.token");
    }

    #[test]
    fn test_environment_without_credentials_fails() {
        let err = Authenticator::from_environment(None, None).err().unwrap();
        assert!(matches!(err, DriveError::AuthenticationError(_)));

        let err = Authenticator::from_environment(Some(String::new()), None)
            .err()
            .unwrap();
        assert!(matches!(err, DriveError::AuthenticationError(_)));
    }
}
