use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use token_board::api::{
    ApiClient, ApiConfig, CredentialProvider, HttpTokenRepository, MemoryCredentialStore,
    TokenRepository, TokenSubmission,
};
use token_board::presenter::{SubmitOutcome, TokenFormPresenter, TokenFormPresenterImpl};
use token_board::view::{BoardProjection, TokenBoardView};
use token_board::{BoardError, ChangeCounter, TokenInteractor, TokenInteractorImpl};

#[derive(Default)]
struct MessageLog {
    messages: Mutex<Vec<String>>,
}

impl MessageLog {
    fn push(&self, message: impl Into<String>) -> Result<()> {
        self.messages.lock().unwrap().push(message.into());
        Ok(())
    }

    fn last(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TokenBoardView for MessageLog {
    async fn display_board(&self, projection: &BoardProjection) -> Result<()> {
        self.push(format!("board {}", projection.rows.len()))
    }
    async fn display_draft(&self, _draft: &token_board::DraftForm) -> Result<()> {
        self.push("draft")
    }
    async fn display_validation_error(&self, message: String) -> Result<()> {
        self.push(format!("invalid: {}", message))
    }
    async fn display_saved(&self) -> Result<()> {
        self.push("saved")
    }
    async fn display_save_failed(&self, message: String) -> Result<()> {
        self.push(format!("save failed: {}", message))
    }
    async fn display_error(&self, message: String) -> Result<()> {
        self.push(format!("error: {}", message))
    }
    async fn display_help(&self, text: String) -> Result<()> {
        self.push(text)
    }
}

fn alpha_table() -> serde_json::Value {
    json!([{
        "rank": 1,
        "symbol": "AAA",
        "name": "Alpha",
        "contract_address": "0x1",
        "total_holders": 100,
        "total_supply": 1000,
        "pctg_supply": 100.0
    }])
}

fn repository(
    server: &MockServer,
    token: Option<&str>,
    credentials: Arc<MemoryCredentialStore>,
) -> HttpTokenRepository {
    let config = ApiConfig::default().with_base_url(server.uri());
    let client = ApiClient::new(&config, token, credentials).unwrap();
    HttpTokenRepository::new(client)
}

#[tokio::test]
async fn stored_token_overrides_construction_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .and(header("authorization", "Bearer stored"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alpha_table()))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::with_token("stored"));
    let repo = repository(&server, Some("boot"), credentials);

    let tokens = repo.retrieve_token_table().await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].symbol, "AAA");
    assert_eq!(tokens[0].total_supply, 1000);
    assert_eq!(tokens[0].percent_supply, 100.0);
}

#[tokio::test]
async fn construction_token_is_used_when_nothing_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .and(header("authorization", "Bearer boot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = repository(&server, Some("boot"), Arc::new(MemoryCredentialStore::new()));
    assert!(repo.retrieve_token_table().await.unwrap().is_empty());
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repo = repository(&server, None, Arc::new(MemoryCredentialStore::new()));
    repo.retrieve_token_table().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn write_sends_wire_body_and_reads_truthiness() {
    let server = MockServer::start().await;
    let body = json!({
        "name": "Alpha",
        "symbol": "AAA",
        "total_supply": 1000,
        "contract_address": "0x1",
        "total_holders": 100
    });
    Mock::given(method("POST"))
        .and(path("/token/AddOrUpdateToken"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/AddOrUpdateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let repo = repository(&server, None, Arc::new(MemoryCredentialStore::new()));
    let submission = TokenSubmission {
        name: "Alpha".to_string(),
        symbol: "AAA".to_string(),
        total_supply: 1000,
        contract_address: "0x1".to_string(),
        total_holders: 100,
    };

    assert!(repo.add_or_update_token(&submission).await.unwrap());
    assert!(!repo.add_or_update_token(&submission).await.unwrap());
}

fn beta_submission() -> TokenSubmission {
    TokenSubmission {
        name: "Beta".to_string(),
        symbol: "BBB".to_string(),
        total_supply: 5,
        contract_address: "0x2".to_string(),
        total_holders: 2,
    }
}

#[tokio::test]
async fn plain_text_acknowledgement_counts_as_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/AddOrUpdateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Saved"))
        .mount(&server)
        .await;

    let repo = repository(&server, None, Arc::new(MemoryCredentialStore::new()));
    assert!(repo.add_or_update_token(&beta_submission()).await.unwrap());
}

#[tokio::test]
async fn empty_body_is_not_an_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/AddOrUpdateToken"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let repo: Arc<dyn TokenRepository> = Arc::new(repository(
        &server,
        None,
        Arc::new(MemoryCredentialStore::new()),
    ));
    assert!(!repo.add_or_update_token(&beta_submission()).await.unwrap());

    let view = Arc::new(MessageLog::default());
    let changes = ChangeCounter::new();
    let form = TokenFormPresenterImpl::new(repo, view.clone(), changes.clone());
    form.set_field(token_board::DraftField::Name, "Beta").await.unwrap();
    form.set_field(token_board::DraftField::Symbol, "BBB").await.unwrap();
    form.set_field(token_board::DraftField::ContactAddress, "0x2").await.unwrap();
    form.set_field(token_board::DraftField::TotalSupply, "5").await.unwrap();
    form.set_field(token_board::DraftField::TotalHolders, "2").await.unwrap();

    assert_eq!(form.submit().await.unwrap(), SubmitOutcome::NotAcknowledged);
    assert_eq!(changes.value(), 0);
}

#[tokio::test]
async fn unauthorized_write_evicts_token_and_keeps_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alpha_table()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/AddOrUpdateToken"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::with_token("expired"));
    let repo: Arc<dyn TokenRepository> =
        Arc::new(repository(&server, None, credentials.clone()));
    let interactor = TokenInteractorImpl::new(repo.clone());
    interactor.load_all().await.unwrap();

    let view = Arc::new(MessageLog::default());
    let changes = ChangeCounter::new();
    let form = TokenFormPresenterImpl::new(repo, view.clone(), changes.clone());
    form.select_for_edit(&interactor.snapshot().tokens[0]).await.unwrap();

    let outcome = form.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(credentials.get().await.unwrap(), None);
    assert_eq!(changes.value(), 0);
    assert_eq!(interactor.snapshot().len(), 1);
    assert_eq!(interactor.snapshot().tokens[0].symbol, "AAA");
    assert!(view.last().unwrap().starts_with("save failed"));
}

#[tokio::test]
async fn server_error_keeps_previous_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alpha_table()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let credentials = Arc::new(MemoryCredentialStore::with_token("valid"));
    let repo = Arc::new(repository(&server, None, credentials.clone()));
    let interactor = TokenInteractorImpl::new(repo);

    interactor.load_all().await.unwrap();
    let err = interactor.load_all().await.unwrap_err();

    match err {
        BoardError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(interactor.snapshot().len(), 1);
    // Only a 401 touches the stored token
    assert_eq!(credentials.get().await.unwrap().as_deref(), Some("valid"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/RetrieveTokenTable"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = ApiConfig::default().with_base_url(server.uri());
    config.timeout = Duration::from_millis(100);
    let client = ApiClient::new(&config, None, Arc::new(MemoryCredentialStore::new())).unwrap();
    let repo = HttpTokenRepository::new(client);

    match repo.retrieve_token_table().await {
        Err(BoardError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}
