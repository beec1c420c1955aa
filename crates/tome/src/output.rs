//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Command results go to stdout; status messages go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a line of command output.
    pub(crate) fn line(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print command output without styling, e.g. JSON or YAML.
    pub(crate) fn raw(&self, msg: &str) {
        let _ = self.out.write_str(msg);
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.err.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Style secondary text (dim).
    pub(crate) fn dim(&self, text: &str) -> String {
        self.dim.apply_to(text).to_string()
    }

    /// Style a heading or key value (cyan bold).
    pub(crate) fn highlight(&self, text: &str) -> String {
        self.cyan_bold.apply_to(text).to_string()
    }
}
