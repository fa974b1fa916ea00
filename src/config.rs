use crate::docx;
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Process-level settings, built once by the command layer and handed to the logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Debug-level logging instead of info.
    pub verbose: bool,
    /// Log records are appended here as well as printed. `None` disables the file.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Inputs of one statement analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub input: PathBuf,
    /// Worksheet name; the first sheet when absent.
    pub sheet: Option<String>,
    /// Output document name, with or without the `.docx` extension.
    pub output: Option<String>,
    pub first_year: Option<i64>,
    pub last_year: Option<i64>,
}

impl ReportOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            sheet: None,
            output: None,
            first_year: None,
            last_year: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        docx::output_path(self.output.as_deref())
    }
}
