//! HTTP client for the link endpoints of a linkshort server.
//!
//! [`HttpLinkClient`] looks up short codes (`GET /api/v1/links/{code}`) and
//! creates links (`POST /api/v1/links`). It also implements
//! [`linkshort_core::Resolver`], folding every failure into a user-facing
//! [`linkshort_core::ResolutionResult::Failed`] reason.
//!
//! # Example
//!
//! ```rust,no_run
//! use linkshort_client::{ClientConfig, HttpLinkClient};
//! use linkshort_core::{Resolver, ShortCode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:8000".parse()?)
//!     .build();
//! let client = HttpLinkClient::new(config)?;
//!
//! let code = ShortCode::new("abc123")?;
//! match client.resolve(&code).await.destination() {
//!     Some(url) => println!("Redirect to: {}", url),
//!     None => println!("Could not resolve {}", code),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{ClientConfig, HttpLinkClient};
pub use error::{ClientError, Result};
