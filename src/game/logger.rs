//! Session diagnostic logger
//!
//! Writes human-readable (or JSON) lines to stdout/stderr and can capture them
//! in memory for tests and for the host process to forward. This is separate
//! from the in-state display log, which players see.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::ops::Deref;

/// Verbosity level for session output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerbosityLevel {
    /// Silent - nothing but warnings
    Silent = 0,
    /// Minimal - session lifecycle only
    Minimal = 1,
    /// Normal - one line per committed action or undo (default)
    #[default]
    Normal = 2,
    /// Verbose - every applied effect
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("invalid output format '{s}' (expected: text, json)")),
        }
    }
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// Captured lines kept before the oldest are dropped
pub const CAPTURE_LIMIT: usize = 10_000;

/// A captured log line
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "warning", "effect")
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, VecDeque<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = VecDeque<LogEntry>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Logger owned by one session
///
/// Logging takes `&self` so that read-only code paths (the action processor
/// validates against `&GameState`) can still report; captured lines live in
/// a `RefCell`. Capture keeps at most `CAPTURE_LIMIT` lines, oldest dropped
/// first, so a long-running captured session stays bounded.
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<VecDeque<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(VecDeque::new()),
        }
    }

    /// A logger that prints nothing and captures everything
    pub fn capturing() -> Self {
        let mut logger = Self::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger
    }

    /// Sets output_mode to Memory (suppresses stdout output)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Captured warnings only
    pub fn warnings(&self) -> Vec<String> {
        self.log_buffer
            .borrow()
            .iter()
            .filter(|e| e.category.as_deref() == Some("warning"))
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, None);
    }

    /// Log one applied effect at Verbose level
    #[inline]
    pub fn effect(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, Some("effect"));
    }

    /// Report a tolerated problem. Printed to stderr at every verbosity.
    pub fn warn(&self, message: &str) {
        if self.is_capturing() {
            self.capture(LogEntry {
                level: VerbosityLevel::Silent,
                message: message.to_string(),
                category: Some("warning".to_string()),
            });
        } else {
            eprintln!("WARNING: {message}");
        }
    }

    fn log(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if self.is_capturing() {
            self.capture(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        } else if level <= self.verbosity {
            println!("{}", self.format_line(level, message));
        }
    }

    fn capture(&self, entry: LogEntry) {
        let mut buffer = self.log_buffer.borrow_mut();
        if buffer.len() >= CAPTURE_LIMIT {
            buffer.pop_front();
        }
        buffer.push_back(entry);
    }

    /// Render one line in the configured output format
    fn format_line(&self, level: VerbosityLevel, message: &str) -> String {
        match self.output_format {
            OutputFormat::Text if level == VerbosityLevel::Minimal => message.to_string(),
            OutputFormat::Text => format!("  {message}"),
            OutputFormat::Json => serde_json::json!({ "level": level, "message": message }).to_string(),
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].message, "minimal message");
    }

    #[test]
    fn test_warnings_are_categorized() {
        let logger = GameLogger::capturing();
        logger.normal("ordinary");
        logger.warn("something odd");

        assert_eq!(logger.warnings(), vec!["something odd".to_string()]);
    }

    #[test]
    fn test_clear_logs() {
        let mut logger = GameLogger::capturing();
        logger.verbose("a");
        assert_eq!(logger.logs().len(), 1);

        logger.clear_logs();
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_capture_is_bounded() {
        let logger = GameLogger::capturing();
        for i in 0..CAPTURE_LIMIT + 5 {
            logger.verbose(&format!("line {i}"));
        }

        let logs = logger.logs();
        assert_eq!(logs.len(), CAPTURE_LIMIT);
        assert_eq!(logs[0].message, "line 5");
    }

    #[test]
    fn test_json_lines() {
        let mut logger = GameLogger::new();
        logger.set_output_format("json".parse().unwrap());
        assert_eq!(logger.output_format(), OutputFormat::Json);

        let line = logger.format_line(VerbosityLevel::Normal, "Alice: draw (2 effects)");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "normal");
        assert_eq!(parsed["message"], "Alice: draw (2 effects)");

        logger.set_output_format(OutputFormat::Text);
        assert_eq!(logger.format_line(VerbosityLevel::Minimal, "hi"), "hi");
        assert_eq!(logger.format_line(VerbosityLevel::Normal, "hi"), "  hi");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_verbosity_parsing() {
        assert_eq!("3".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Verbose));
        assert_eq!("Silent".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Silent));
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }
}
