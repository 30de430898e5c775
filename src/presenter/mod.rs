pub mod board_presenter;
pub mod token_form_presenter;

pub use board_presenter::{BoardPresenter, BoardPresenterImpl};
pub use token_form_presenter::{
    validate_draft, SubmitOutcome, TokenFormPresenter, TokenFormPresenterImpl, MIN_LIMIT,
};
