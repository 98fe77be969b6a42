//! Fluent constructors for conditions and actions
//!
//! ```rust
//! use tenant_rules_core::builder::{action, condition};
//!
//! let when = condition::and(vec![
//!     condition::equals("entityType", "order"),
//!     condition::greater_than("entity.total", 200),
//! ]);
//! let then = action::percentage_fee(10.0);
//! # let _ = (when, then);
//! ```

pub mod action;
pub mod condition;
