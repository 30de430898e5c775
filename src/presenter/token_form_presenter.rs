use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{TokenRepository, TokenSubmission};
use crate::entity::{ChangeCounter, DraftField, DraftForm, TokenRecord, ValidationError};
use crate::utils::parse_numeric_input;
use crate::view::TokenBoardView;

pub const MIN_LIMIT: i64 = 1;

/// How a submit attempt ended; every variant is also shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    NotAcknowledged,
    Rejected(ValidationError),
    Failed(String),
}

// Checks run before any request is made
pub fn validate_draft(draft: &DraftForm) -> Result<(), ValidationError> {
    if draft.total_supply < MIN_LIMIT || draft.total_holders < MIN_LIMIT {
        return Err(ValidationError::NonPositiveAmounts);
    }
    if let Some(field) = draft.missing_field() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

#[async_trait]
pub trait TokenFormPresenter: Send + Sync {
    async fn select_for_edit(&self, record: &TokenRecord) -> Result<()>;
    async fn reset(&self) -> Result<()>;
    async fn set_field(&self, field: DraftField, input: &str) -> Result<()>;
    async fn submit(&self) -> Result<SubmitOutcome>;
    async fn show_draft(&self) -> Result<()>;
    async fn draft(&self) -> DraftForm;
}

pub struct TokenFormPresenterImpl<V> {
    token_repository: Arc<dyn TokenRepository>,
    view: Arc<V>,
    changes: ChangeCounter,
    draft: Mutex<DraftForm>,
}

impl<V> TokenFormPresenterImpl<V>
where
    V: TokenBoardView,
{
    pub fn new(
        token_repository: Arc<dyn TokenRepository>,
        view: Arc<V>,
        changes: ChangeCounter,
    ) -> Self {
        Self {
            token_repository,
            view,
            changes,
            draft: Mutex::new(DraftForm::default()),
        }
    }
}

#[async_trait]
impl<V> TokenFormPresenter for TokenFormPresenterImpl<V>
where
    V: TokenBoardView + Send + Sync,
{
    async fn select_for_edit(&self, record: &TokenRecord) -> Result<()> {
        let draft = DraftForm::from_record(record);
        *self.draft.lock().await = draft.clone();

        self.view.display_draft(&draft).await
    }

    async fn reset(&self) -> Result<()> {
        let draft = {
            let mut draft = self.draft.lock().await;
            draft.clear();
            draft.clone()
        };

        self.view.display_draft(&draft).await
    }

    async fn set_field(&self, field: DraftField, input: &str) -> Result<()> {
        let draft = {
            let mut draft = self.draft.lock().await;
            match field {
                DraftField::Name => draft.name = input.to_string(),
                DraftField::Symbol => draft.symbol = input.to_string(),
                DraftField::ContactAddress => draft.contact_address = input.to_string(),
                DraftField::TotalSupply | DraftField::TotalHolders => {
                    let value = match parse_numeric_input(field, input) {
                        Ok(value) => value,
                        Err(e) => {
                            drop(draft);
                            return self.view.display_validation_error(e.to_string()).await;
                        }
                    };
                    if field == DraftField::TotalSupply {
                        draft.total_supply = value;
                    } else {
                        draft.total_holders = value;
                    }
                }
            }
            draft.clone()
        };

        self.view.display_draft(&draft).await
    }

    async fn submit(&self) -> Result<SubmitOutcome> {
        let draft = self.draft.lock().await.clone();

        if let Err(e) = validate_draft(&draft) {
            self.view.display_validation_error(e.to_string()).await?;
            return Ok(SubmitOutcome::Rejected(e));
        }

        let submission = TokenSubmission::from(&draft);
        match self.token_repository.add_or_update_token(&submission).await {
            Ok(true) => {
                let count = self.changes.increment();
                info!("Token {} saved (change #{})", submission.symbol, count);
                self.view.display_saved().await?;
                Ok(SubmitOutcome::Saved)
            }
            Ok(false) => {
                warn!("Server did not acknowledge token {}", submission.symbol);
                self.view
                    .display_save_failed("the server did not acknowledge the write".to_string())
                    .await?;
                Ok(SubmitOutcome::NotAcknowledged)
            }
            Err(e) => {
                error!("Error posting token {}: {}", submission.symbol, e);
                let message = e.to_string();
                self.view.display_save_failed(message.clone()).await?;
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    async fn show_draft(&self) -> Result<()> {
        let draft = self.draft().await;
        self.view.display_draft(&draft).await
    }

    async fn draft(&self) -> DraftForm {
        self.draft.lock().await.clone()
    }
}
