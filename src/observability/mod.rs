//! OpenTelemetry tracing with file-based OTLP export.
//!
//! The menu owns the terminal while it runs, so diagnostics cannot go to
//! stderr. Instead, `tracing` spans are bridged into OpenTelemetry and written
//! as OTLP/JSON lines to a local file that any OTLP-aware tool can read.
//!
//! ```text
//! tracing → tracing-opentelemetry → SDK provider → FileExporter → rotating JSON file
//! ```
//!
//! # Features
//!
//! - **File Location**: `$XDG_DATA_HOME/pickmenu/pickmenu-otlp.json`, falling
//!   back to `~/.local/share/pickmenu/`
//! - **Rotation**: 10 MiB per file, 3 timestamped backups
//! - **Filtering**: `trace_level` takes any `EnvFilter` directive
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - `tracer`: Provider and file exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: Size-rotating writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
