//! Run-scoped diagnostics sink
//!
//! Every component that needs to log receives a `&Diagnostics` at
//! construction; there is no global logger. The sink is an injected writer
//! (a truncated log file in production, an in-memory buffer in tests) and
//! lives exactly as long as one comparison run.

use anyhow::Context;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARNING",
        }
    }
}

pub struct Diagnostics {
    sink: RefCell<Box<dyn Write>>,
}

impl Diagnostics {
    pub fn new(sink: Box<dyn Write>) -> Self {
        Diagnostics {
            sink: RefCell::new(sink),
        }
    }

    /// Open a file-backed sink at the given path, truncating any previous log.
    pub fn to_file(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("unable to open diagnostic log at {}", path.display()))?;

        Ok(Self::new(Box::new(file)))
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(Level::Trace, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warn, message.as_ref());
    }

    // A failing sink must never fail the run, so write errors are dropped.
    fn log(&self, level: Level, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(
            self.sink.borrow_mut(),
            "{} - {} - {}",
            timestamp,
            level.as_str(),
            message
        );
    }
}
