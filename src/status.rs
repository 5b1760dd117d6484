use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

lazy_static! {
    /// The color of the warnings.
    static ref WARNING: ColorSpec = {
        let mut color = ColorSpec::new();
        color.set_fg(Some(Color::Yellow)).set_intense(true);
        color
    };
    /// The color of the errors.
    static ref ERROR: ColorSpec = {
        let mut color = ColorSpec::new();
        color
            .set_fg(Some(Color::Red))
            .set_intense(true)
            .set_bold(true);
        color
    };
}

/// A single line of feedback for the user, one message at a time.
///
/// Every message is also sent to the log. Failures writing to the stream are ignored: the status
/// line is never a reason for a launch to fail.
#[derive(Debug)]
pub struct StatusLine<W: WriteColor> {
    stream: W,
}

impl StatusLine<StandardStream> {
    /// A status line on the standard output, colored when it is a terminal.
    pub fn stdout() -> StatusLine<StandardStream> {
        StatusLine::new(StandardStream::stdout(ColorChoice::Auto))
    }
}

impl<W: WriteColor> StatusLine<W> {
    /// Make a status line writing to `stream`.
    pub fn new(stream: W) -> StatusLine<W> {
        StatusLine { stream }
    }

    /// Show an informative message.
    pub fn push<S: AsRef<str>>(&mut self, message: S) {
        let message = message.as_ref();
        info!("Status: {}", message);
        let _ = writeln!(self.stream, "{}", message);
    }

    /// Show a warning.
    pub fn warning<S: AsRef<str>>(&mut self, message: S) {
        let message = format!("Warning: {}", message.as_ref());
        warn!("Status: {}", message);
        let _ = self.write_colored(&WARNING, &message);
    }

    /// Show an error.
    pub fn error<S: AsRef<str>>(&mut self, message: S) {
        let message = format!("Error: {}", message.as_ref());
        error!("Status: {}", message);
        let _ = self.write_colored(&ERROR, &message);
    }

    /// The underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.stream
    }

    fn write_colored(&mut self, color: &ColorSpec, message: &str) -> std::io::Result<()> {
        self.stream.set_color(color)?;
        writeln!(self.stream, "{}", message)?;
        self.stream.reset()
    }
}
