mod error;
mod field;
mod reducers;
mod section;
mod session;
mod state;

pub use error::FormError;
pub use field::{ControlKind, DATE_FORMAT, FieldState, KeyOutcome, is_valid_date};
pub use reducers::{FillCommand, apply_command};
pub use section::FieldGroup;
pub use session::{FillSession, SubmissionPhase};
pub use state::FillState;
