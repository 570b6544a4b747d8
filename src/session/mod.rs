//! Session state: token persistence and claim decoding.
//!
//! Two layers with a hard boundary: [`store::TokenStore`] only moves the
//! token string in and out of the user's runtime directory, while
//! [`claims`] interprets it. [`claims::Session`] is re-derived from the
//! store on every read; nothing here caches session state in module
//! scope.

pub mod claims;
pub mod store;

pub use claims::{Role, Session};
pub use store::TokenStore;
