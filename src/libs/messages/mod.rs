//! User-facing text.
//!
//! Every line the command line prints goes through [`Message`], so wording
//! lives in one place ([`display`]) and output routing in another
//! ([`macros`]).

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
