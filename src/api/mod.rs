pub mod client;
pub mod config;
pub mod credentials;
pub mod models;
pub mod token_repository;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use credentials::{
    CredentialProvider, FileCredentialStore, MemoryCredentialStore, ACCESS_TOKEN_KEY,
};
pub use models::{TokenSubmission, ADD_OR_UPDATE_TOKEN_PATH, RETRIEVE_TOKEN_TABLE_PATH};
pub use token_repository::{HttpTokenRepository, TokenRepository};
