//! Thin convenience wrapper around a cloud transactional email service.
//!
//! The [`Email`] builder accumulates addressing and content for a single
//! message and dispatches it through an [`EmailTransport`] session obtained
//! from a [`Connect`] implementation. Simple sends carry a text or HTML
//! body; attachment sends serialize a full `multipart/mixed` document and
//! hand it to the provider as a raw message.

pub mod config;
pub mod email;
pub mod error;
pub mod mime;
pub mod transport;

pub use email::{Body, Email, Recipients};
pub use error::Error;
pub use mime::RawMessage;
pub use transport::{Connect, Credentials, EmailTransport, SendResponse};
