//! Tracer provider exporting spans to a local OTLP/JSON file.

use super::file_writer::{RotatingWriter, RotationPolicy};
use super::span_formatter::OtlpEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future;
use std::path::PathBuf;

/// Span exporter appending one OTLP document per batch to a rotating file.
#[derive(Debug)]
struct FileExporter {
    writer: RotatingWriter,
    encoder: OtlpEncoder,
    closed: bool,
}

impl FileExporter {
    fn write(&self, batch: &[SpanData]) -> ExportResult {
        if self.closed {
            return Err(TraceError::from("trace file exporter is closed"));
        }
        let document = self.encoder.encode(batch).to_string();
        self.writer
            .write_line(&document)
            .map_err(|e| TraceError::from(format!("{}: {e}", self.writer.path().display())))
    }
}

impl SpanExporter for FileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(future::ready(self.write(&batch)))
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }
}

/// Builds a provider whose spans end up in `path`.
///
/// Spans are exported one by one as they close, so the file is current even
/// if the process exits without shutting the provider down.
pub fn file_tracer_provider(
    path: PathBuf,
    resource: Resource,
    scope: &str,
    policy: RotationPolicy,
) -> TracerProvider {
    let exporter = FileExporter {
        writer: RotatingWriter::new(path, policy),
        encoder: OtlpEncoder::new(&resource, scope),
        closed: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
