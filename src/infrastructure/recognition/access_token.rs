use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};

use crate::application::ports::RecognitionError;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Issues OAuth bearer tokens for Google APIs.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, RecognitionError>;
}

/// Exchanges a signed service account grant for a token and reuses it until
/// it is close to expiry.
pub struct ServiceAccountTokenSource {
    account: CustomServiceAccount,
}

impl ServiceAccountTokenSource {
    pub fn from_json(key_json: &str) -> Result<Self, RecognitionError> {
        let account = CustomServiceAccount::from_json(key_json)
            .map_err(|e| RecognitionError::Misconfigured(format!("service account key: {}", e)))?;
        Ok(Self { account })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, RecognitionError> {
        let token = self
            .account
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("access token: {}", e)))?;
        Ok(token.as_str().to_string())
    }
}
