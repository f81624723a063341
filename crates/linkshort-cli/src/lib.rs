//! Terminal front end for linkshort.
//!
//! The `linkshort` binary wires [`linkshort_client::HttpLinkClient`] into a
//! [`linkshort_redirect::RedirectSession`]: keys typed on stdin become
//! session commands, views are rendered to stderr and the final destination is
//! printed to stdout.

pub mod clipboard;
pub mod input;
pub mod render;
pub mod terminal;

pub use clipboard::SystemClipboard;
pub use input::{forward_lines, parse_command, KEY_HELP};
pub use render::render;
pub use terminal::TerminalNavigator;
