use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    ApiClient, ApiConfig, CredentialProvider, FileCredentialStore, HttpTokenRepository,
    TokenRepository,
};
use crate::entity::{BoardResult, ChangeCounter};
use crate::interactor::{TokenInteractor, TokenInteractorImpl};
use crate::presenter::{BoardPresenterImpl, TokenFormPresenter, TokenFormPresenterImpl};
use crate::services::RefreshService;
use crate::view::TokenBoardView;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    refresh_interval: Duration,
    token_repository: Arc<dyn TokenRepository>,
    token_interactor: Arc<dyn TokenInteractor>,
    changes: ChangeCounter,
}

impl ServiceContainer {
    /// Wire the board against the API, with the token file as credential storage
    pub fn new(config: ApiConfig) -> BoardResult<Self> {
        let credentials = Arc::new(FileCredentialStore::new(config.credentials_file.clone()))
            as Arc<dyn CredentialProvider>;
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> BoardResult<Self> {
        let client = ApiClient::new(&config, config.access_token.as_deref(), credentials)?;

        let token_repository =
            Arc::new(HttpTokenRepository::new(client)) as Arc<dyn TokenRepository>;
        let token_interactor = Arc::new(TokenInteractorImpl::new(token_repository.clone()))
            as Arc<dyn TokenInteractor>;

        Ok(Self {
            refresh_interval: config.refresh_interval,
            token_repository,
            token_interactor,
            changes: ChangeCounter::new(),
        })
    }

    pub fn token_repository(&self) -> Arc<dyn TokenRepository> {
        self.token_repository.clone()
    }

    pub fn token_interactor(&self) -> Arc<dyn TokenInteractor> {
        self.token_interactor.clone()
    }

    pub fn changes(&self) -> ChangeCounter {
        self.changes.clone()
    }

    pub fn refresh_service(&self) -> RefreshService {
        RefreshService::new(
            self.token_interactor(),
            self.changes(),
            self.refresh_interval,
        )
    }

    pub fn form_presenter<V>(&self, view: Arc<V>) -> Arc<TokenFormPresenterImpl<V>>
    where
        V: TokenBoardView + Send + Sync + 'static,
    {
        Arc::new(TokenFormPresenterImpl::new(
            self.token_repository(),
            view,
            self.changes(),
        ))
    }

    pub fn board_presenter<V>(
        &self,
        view: Arc<V>,
        form: Arc<dyn TokenFormPresenter>,
    ) -> Arc<BoardPresenterImpl<V>>
    where
        V: TokenBoardView + Send + Sync + 'static,
    {
        Arc::new(BoardPresenterImpl::new(self.token_interactor(), form, view))
    }
}
