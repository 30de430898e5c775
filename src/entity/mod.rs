mod board_error;
mod change_counter;
mod draft_form;
mod token_record;
mod token_snapshot;

pub use board_error::{BoardError, BoardResult, ValidationError};
pub use change_counter::ChangeCounter;
pub use draft_form::{DraftField, DraftForm};
pub use token_record::TokenRecord;
pub use token_snapshot::TokenSnapshot;
