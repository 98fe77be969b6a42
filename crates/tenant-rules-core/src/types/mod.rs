//! Runtime type system
//!
//! Rules are authored as data, so every field they touch is a dynamically
//! typed [`Value`]. Coercions mirror the loose typing rule authors expect
//! from JSON-based storefront configuration.

pub mod value;

pub use value::Value;
