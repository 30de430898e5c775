use async_trait::async_trait;
use log::{debug, info};

use crate::api::client::ApiClient;
use crate::api::models::{TokenSubmission, ADD_OR_UPDATE_TOKEN_PATH, RETRIEVE_TOKEN_TABLE_PATH};
use crate::entity::{BoardResult, TokenRecord};
use crate::utils::is_truthy;

/// Remote source of the token table
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Fetch the full table, in server order
    async fn retrieve_token_table(&self) -> BoardResult<Vec<TokenRecord>>;

    /// Create or update a token; `true` when the server acknowledged the write
    async fn add_or_update_token(&self, submission: &TokenSubmission) -> BoardResult<bool>;
}

/// Token repository backed by the REST API
pub struct HttpTokenRepository {
    client: ApiClient,
}

impl HttpTokenRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenRepository for HttpTokenRepository {
    async fn retrieve_token_table(&self) -> BoardResult<Vec<TokenRecord>> {
        let tokens: Vec<TokenRecord> = self.client.get_json(RETRIEVE_TOKEN_TABLE_PATH).await?;
        debug!("Retrieved {} tokens", tokens.len());
        Ok(tokens)
    }

    async fn add_or_update_token(&self, submission: &TokenSubmission) -> BoardResult<bool> {
        info!("Saving token {} ({})", submission.symbol, submission.name);

        // The payload schema is not fixed, only its truthiness counts
        let payload = self
            .client
            .post_payload(ADD_OR_UPDATE_TOKEN_PATH, submission)
            .await?;
        debug!("AddOrUpdateToken answered {}", payload);

        Ok(is_truthy(&payload))
    }
}
