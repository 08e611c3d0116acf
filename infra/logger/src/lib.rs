//! # Logger
//!
//! Installs the process-wide `tracing` subscriber: a compact console layer and an
//! optional rolling file layer written from a background thread.
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from the directive
//! passed to [`LoggerBuilder::filter`] (`"info"`, `"orc_registry=debug,info"`).
//!
//! ```rust
//! # use orc_logger::Logger;
//! let _logger = Logger::builder().name("orc-server").filter("debug").init().unwrap();
//! tracing::info!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing_appender::rolling::Rotation;

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_FILTER: &str = "info";
const DEFAULT_MAX_FILES: usize = 14;

#[derive(Debug)]
struct Settings {
    filter: String,
    console: bool,
    json: bool,
    directory: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
            console: true,
            json: false,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct Anonymous;
#[derive(Debug)]
pub struct Named(String);

mod sealed {
    pub trait Sealed {}
}
impl sealed::Sealed for Anonymous {}
impl sealed::Sealed for Named {}

/// Configures the global subscriber. A name is required before [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct LoggerBuilder<N: sealed::Sealed = Anonymous> {
    name: N,
    settings: Settings,
}

impl LoggerBuilder<Anonymous> {
    /// Names the application; log files are called `<name>.<date>.log`.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { name: Named(name.into()), settings: self.settings }
    }
}

impl<N: sealed::Sealed> LoggerBuilder<N> {
    /// Default filter directive, used when `RUST_LOG` is absent.
    #[must_use]
    pub fn filter(mut self, directive: impl Into<String>) -> Self {
        self.settings.filter = directive.into();
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Emits JSON lines instead of the human readable format.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }

    /// Also writes to rolling files in `dir`. `None` keeps console only.
    #[must_use]
    pub fn directory(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.settings.directory = dir.map(Into::into);
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }
}

impl LoggerBuilder<Named> {
    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it flushes
    /// and stops the file writer.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for an empty name, a malformed
    ///   filter, `max_files == 0`, or when neither console nor file output is on.
    /// - [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// - [`LoggerError::Subscriber`] if a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { name: Named(name), settings } = self;
        settings.validate(&name)?;

        let filter = settings.env_filter()?;
        let mut layers = Vec::new();

        if settings.console {
            let console = fmt::layer().with_target(true);
            layers.push(if settings.json {
                console.json().boxed()
            } else {
                console.compact().with_ansi(true).boxed()
            });
        }

        let guard = match &settings.directory {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .context(format!("Failed to create {}", dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(settings.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix("log")
                    .max_log_files(settings.max_files)
                    .build(dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(if settings.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

impl Settings {
    fn validate(&self, name: &str) -> Result<(), LoggerError> {
        let problem = if name.trim().is_empty() {
            Some("Logger name cannot be empty")
        } else if self.max_files == 0 {
            Some("max_files must be greater than zero")
        } else if !self.console && self.directory.is_none() {
            Some("Enable console output or set a log directory")
        } else {
            None
        };

        problem.map_or(Ok(()), |message| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        })
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        EnvFilter::try_new(&self.filter).map_err(|err| LoggerError::InvalidConfiguration {
            message: format!("Invalid filter '{}': {err}", self.filter).into(),
            context: None,
        })
    }
}

/// Handle to the installed subscriber. Holds the file writer's guard.
#[must_use = "Dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Anonymous, settings: Settings::default() }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}
