use linkshort_redirect::Navigator;
use std::io::{self, Stdout, Write};
use tracing::{info, warn};

/// Navigates by printing the target URL, one per line.
///
/// Going home prints the server root the client talks to.
#[derive(Debug)]
pub struct TerminalNavigator<W = Stdout> {
    out: W,
    home: String,
}

impl TerminalNavigator<Stdout> {
    pub fn stdout(home: impl Into<String>) -> Self {
        Self::new(io::stdout(), home)
    }
}

impl<W: Write> TerminalNavigator<W> {
    pub fn new(out: W, home: impl Into<String>) -> Self {
        Self {
            out,
            home: home.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, url: &str) {
        let written = writeln!(self.out, "{url}").and_then(|_| self.out.flush());
        if let Err(err) = written {
            warn!(url = %url, error = %err, "failed to print navigation target");
        }
    }
}

impl<W: Write + Send + 'static> Navigator for TerminalNavigator<W> {
    fn navigate(&mut self, destination: &str) {
        info!(destination = %destination, "redirecting");
        self.emit(destination);
    }

    fn navigate_home(&mut self) {
        let home = self.home.clone();
        self.emit(&home);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_destination_and_home() {
        let mut navigator = TerminalNavigator::new(Vec::new(), "http://localhost:8000/");
        navigator.navigate("https://example.com/page");
        navigator.navigate_home();

        let out = String::from_utf8(navigator.into_inner()).unwrap();
        assert_eq!(out, "https://example.com/page\nhttp://localhost:8000/\n");
    }
}
