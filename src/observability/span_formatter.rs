//! OTLP/JSON encoding of exported spans.
//!
//! Each exported batch becomes one JSON document on one line, shaped like an
//! OTLP `ExportTraceServiceRequest`:
//!
//! ```json
//! {"resourceSpans":[{"resource":{"attributes":[...]},
//!   "scopeSpans":[{"scope":{"name":"pickmenu"},"spans":[...]}]}]}
//! ```
//!
//! IDs are lower-case hex, timestamps are decimal nanosecond strings and
//! 64-bit integers are strings, as the OTLP JSON mapping requires.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as Json};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes span batches for one resource and instrumentation scope.
pub struct OtlpEncoder {
    resource: Json,
    scope: String,
}

impl OtlpEncoder {
    /// Creates an encoder. The resource attributes are encoded once here.
    pub fn new(resource: &Resource, scope: impl Into<String>) -> Self {
        let attributes: Vec<Json> = resource
            .iter()
            .map(|(key, value)| attribute(key.as_str(), value))
            .collect();

        Self {
            resource: json!({ "attributes": attributes }),
            scope: scope.into(),
        }
    }

    /// Encodes `batch` as a single OTLP document.
    pub fn encode(&self, batch: &[SpanData]) -> Json {
        let spans: Vec<Json> = batch.iter().map(span).collect();

        json!({
            "resourceSpans": [{
                "resource": self.resource,
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans,
                }],
            }],
        })
    }
}

impl std::fmt::Debug for OtlpEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpEncoder")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn span(data: &SpanData) -> Json {
    let parent = if data.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", data.parent_span_id)
    };
    let (code, message) = status(&data.status);

    json!({
        "traceId": format!("{:032x}", data.span_context.trace_id()),
        "spanId": format!("{:016x}", data.span_context.span_id()),
        "parentSpanId": parent,
        "name": data.name,
        "kind": kind(&data.span_kind),
        "startTimeUnixNano": unix_nanos(data.start_time),
        "endTimeUnixNano": unix_nanos(data.end_time),
        "attributes": attributes(&data.attributes),
        "droppedAttributesCount": data.dropped_attributes_count,
        "events": data.events.iter().map(event).collect::<Vec<_>>(),
        "links": data.links.iter().map(link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

/// OTLP `SpanKind` enum values.
const fn kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn event(event: &Event) -> Json {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn link(link: &Link) -> Json {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

fn attributes(pairs: &[KeyValue]) -> Vec<Json> {
    pairs
        .iter()
        .map(|kv| attribute(kv.key.as_str(), &kv.value))
        .collect()
}

fn attribute(key: &str, value: &Value) -> Json {
    json!({ "key": key, "value": any_value(value) })
}

fn any_value(value: &Value) -> Json {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

/// Nanoseconds since the epoch as a decimal string; 0 for earlier times.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos())
        .to_string()
}
