//! Shell output
//!
//! All user-facing text goes through a [`Console`] so tests can capture it.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Cloneable handle to the shell's output stream
#[derive(Clone)]
pub struct Console {
    sink: Sink,
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self { sink: Arc::new(Mutex::new(Box::new(writer))) }
    }

    /// Console writing into a shared buffer
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::from_writer(captured.clone()), captured)
    }

    /// Write one line
    pub fn line(&self, text: impl AsRef<str>) {
        let mut sink = self.sink.lock();
        // Output errors (closed pipe) are not actionable from the shell.
        let _ = writeln!(sink, "{}", text.as_ref());
        let _ = sink.flush();
    }

    /// Write text without a newline, e.g. a streamed token or a prompt
    pub fn write(&self, text: &str) {
        let mut sink = self.sink.lock();
        let _ = write!(sink, "{text}");
        let _ = sink.flush();
    }

    /// Redraw the current line in place
    pub fn status(&self, text: &str) {
        self.write(&format!("\r\x1b[2K{text}"));
    }
}

/// Buffer behind [`Console::capture`]
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
