use crate::config::AppConfig;
use crate::error::Result;
use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};

/// Copies every log record to the console and, when configured, to a log file.
pub struct LogSink<C: Write> {
    console: C,
    file: Option<File>,
}

impl<C: Write> LogSink<C> {
    pub fn new(console: C, file: Option<File>) -> Self {
        Self { console, file }
    }
}

impl<C: Write> Write for LogSink<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Installs the global logger: `date time [LEVEL] message` on stdout and in the log file.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let file = match &config.log_file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };
    let sink = LogSink::new(io::stdout(), file);

    Builder::from_env(Env::default().default_filter_or(config.log_level().as_str()))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(sink)))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    log::debug!(
        "Logging initialized (verbose={}, log_file={:?})",
        config.verbose,
        config.log_file
    );
    Ok(())
}
