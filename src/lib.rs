pub mod api;
pub mod commands;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod services;
pub mod utils;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use di::ServiceContainer;
pub use entity::*;
pub use interactor::{LoadOutcome, TokenInteractor, TokenInteractorImpl};
pub use presenter::{BoardPresenter, SubmitOutcome, TokenFormPresenter};
