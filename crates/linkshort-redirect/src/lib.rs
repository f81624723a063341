//! Redirect state machine for resolved short links.
//!
//! [`RedirectScheduler`] turns a resolver result into a visible status, runs
//! the countdown before navigating, and makes sure navigation happens at most
//! once per resolution. Timers, navigation and the clipboard come from an
//! injected [`Host`], so the scheduler can be driven by a simulated clock in
//! tests and by tokio in [`RedirectSession`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use linkshort_core::{ResolutionResult, Resolver, ShortCode};
//! use linkshort_redirect::{
//!     ClipboardError, Clipboard, Navigator, RedirectPolicy, RedirectSession,
//! };
//!
//! struct Fixed;
//!
//! #[async_trait::async_trait]
//! impl Resolver for Fixed {
//!     async fn resolve(&self, _code: &ShortCode) -> ResolutionResult {
//!         ResolutionResult::Resolved { destination: "https://example.com".into() }
//!     }
//! }
//!
//! struct Print;
//!
//! impl Navigator for Print {
//!     fn navigate(&mut self, destination: &str) { println!("{destination}"); }
//!     fn navigate_home(&mut self) {}
//! }
//!
//! struct NoClipboard;
//!
//! impl Clipboard for NoClipboard {
//!     fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
//!         Err(ClipboardError::Unavailable("headless".into()))
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (session, _views) =
//!     RedirectSession::new(Arc::new(Fixed), RedirectPolicy::default(), Print, NoClipboard);
//! let (_commands, rx) = tokio::sync::mpsc::channel(8);
//! let view = session.run(ShortCode::new("abc123")?, rx).await;
//! assert!(view.state.navigated());
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod policy;
pub mod scheduler;
pub mod session;
pub mod state;

pub use host::{ClipboardError, Host, TimerId};
pub use policy::RedirectPolicy;
pub use scheduler::{Action, Attempt, RedirectScheduler, RedirectView};
pub use session::{Clipboard, Command, Navigator, RedirectSession, TokioHost};
pub use state::{RedirectState, Status};
