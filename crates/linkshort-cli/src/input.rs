use linkshort_core::ShortCode;
use linkshort_redirect::Command;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const KEY_HELP: &str =
    "keys: [p] proceed  [c] cancel  [y] copy  [r] retry  [h] home  [o <code>] open  [q] quit";

/// Maps one line typed while a redirect is shown to a session command.
///
/// Blank and unknown lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if let Some((key, arg)) = line.split_once(char::is_whitespace) {
        return match key {
            "o" | "open" => ShortCode::from_route(arg.trim()).ok().map(Command::Enter),
            _ => None,
        };
    }
    match line.to_ascii_lowercase().as_str() {
        "p" | "proceed" => Some(Command::Proceed),
        "c" | "cancel" => Some(Command::Cancel),
        "y" | "copy" => Some(Command::Copy),
        "r" | "retry" => Some(Command::Retry),
        "h" | "home" => Some(Command::Home),
        "q" | "quit" => Some(Command::Teardown),
        _ => None,
    }
}

/// Reads `reader` line by line and sends every recognised command.
///
/// Blocks the calling thread. Returns when the reader is exhausted or the
/// session stopped listening.
pub fn forward_lines<R: BufRead>(reader: R, commands: &mpsc::Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read input");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(command) => {
                debug!(command = ?command, "forwarding input");
                if commands.blocking_send(command).is_err() {
                    return;
                }
            }
            None => eprintln!("{KEY_HELP}"),
        }
    }
    debug!("input closed");
}
