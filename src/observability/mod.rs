//! Tracing export to a local OTLP/JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider
//!               → FileSpanExporter → <data_dir>/marquee-otlp.json (rotated)
//! ```
//!
//! The level comes from the `trace_level` option, `info` by default. Web
//! requests carry the active trace in their context map, so the span that
//! handles a response joins the trace of the action that issued it.
//!
//! - `init`: subscriber setup
//! - `export`: the file span exporter and tracer provider
//! - `otlp`: OTLP/JSON encoding
//! - `rotate`: size-based file rotation

mod export;
mod init;
mod otlp;
mod rotate;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
pub use rotate::RotatingFile;
