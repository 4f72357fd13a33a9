use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

const IMDS_TOKEN_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2019-08-01";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Token request failed: {0}")]
    Request(String),

    #[error("Token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed token response: {0}")]
    Malformed(String),
}

/// Bearer token plus its expiry, as returned by the identity endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

/// Source of bearer tokens for the upstream API. Injected into the handler
/// state so tests can substitute a fixed or failing provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self, scope: &str) -> Result<AccessToken, CredentialError>;
}

/// Fetches tokens from the Azure instance metadata service. No caching:
/// every call hits the endpoint, so each inbound request gets a fresh token.
pub struct ManagedIdentityCredential {
    client: reqwest::Client,
    endpoint: String,
}

impl ManagedIdentityCredential {
    pub fn new(client: reqwest::Client) -> Self {
        let endpoint = std::env::var("IDENTITY_ENDPOINT")
            .unwrap_or_else(|_| IMDS_TOKEN_ENDPOINT.to_string());
        Self { client, endpoint }
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for ManagedIdentityCredential {
    async fn get_token(&self, scope: &str) -> Result<AccessToken, CredentialError> {
        // IMDS takes a resource identifier, not a scope; drop the suffix.
        let resource = scope.trim_end_matches("/.default");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Metadata", "true")
            .query(&[("api-version", IMDS_API_VERSION), ("resource", resource)])
            .send()
            .await
            .map_err(|e| CredentialError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: ImdsTokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::Malformed(e.to_string()))?;

        body.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct ImdsTokenResponse {
    access_token: String,
    expires_on: ExpiresOn,
}

/// IMDS has returned this field both as a string and as a number across
/// api-versions; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresOn {
    Seconds(i64),
    Text(String),
}

impl TryFrom<ImdsTokenResponse> for AccessToken {
    type Error = CredentialError;

    fn try_from(response: ImdsTokenResponse) -> Result<Self, Self::Error> {
        let seconds = match response.expires_on {
            ExpiresOn::Seconds(s) => s,
            ExpiresOn::Text(s) => s
                .parse::<i64>()
                .map_err(|_| CredentialError::Malformed(format!("bad expires_on '{s}'")))?,
        };

        let expires_on = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| CredentialError::Malformed(format!("bad expires_on '{seconds}'")))?;

        Ok(AccessToken {
            token: response.access_token,
            expires_on,
        })
    }
}
