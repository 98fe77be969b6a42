//! Action application
//!
//! Each action runs in isolation and yields either an [`Effect`] or an
//! [`ActionError`](crate::ActionError). Effects fold into one
//! [`ActionOutcome`]; errors become strings in the same outcome and the
//! remaining actions still run.

mod aggregate;
mod applicator;

pub use aggregate::compute_aggregate;
pub use applicator::{apply_actions, execute_action, ActionOutcome, Effect};
