//! Core types and traits for the linkshort client.
//!
//! This crate provides the types shared by the HTTP client and the redirect
//! state machine: short codes, lookup/creation wire models, the
//! [`ResolutionResult`] a lookup is normalized into, and the [`Resolver`]
//! trait that ties them together.

pub mod error;
pub mod expiry;
pub mod model;
pub mod resolution;
pub mod resolver;
pub mod shortcode;

pub use error::{CoreError, Result};
pub use expiry::ExpiryOption;
pub use model::{CreateLinkRequest, CreatedLink, ErrorBody, LookupResponse, OneOrMany};
pub use resolution::ResolutionResult;
pub use resolver::Resolver;
pub use shortcode::ShortCode;
