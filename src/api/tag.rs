//! Request context carried through the host's web-request round trip.
//!
//! The host hands the context map of a request back unchanged with its
//! response. [`RequestTag`] encodes what the response decodes to, which
//! sequence number it answers, and the trace that issued it.

use std::collections::BTreeMap;

const KEY_PAYLOAD: &str = "marquee.payload";
const KEY_SEQ: &str = "marquee.seq";
const KEY_TRACE_ID: &str = "marquee.trace_id";
const KEY_PARENT_SPAN_ID: &str = "marquee.parent_span_id";

/// The body type a response decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Movies,
    People,
    Companies,
    Multi,
    Detail,
    Genres,
}

/// Independent request streams; ordering is enforced per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Catalog,
    Detail,
    Genres,
}

impl Payload {
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::Movies | Self::People | Self::Companies | Self::Multi => Channel::Catalog,
            Self::Detail => Channel::Detail,
            Self::Genres => Channel::Genres,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::People => "people",
            Self::Companies => "companies",
            Self::Multi => "multi",
            Self::Detail => "detail",
            Self::Genres => "genres",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "movies" => Self::Movies,
            "people" => Self::People,
            "companies" => Self::Companies,
            "multi" => Self::Multi,
            "detail" => Self::Detail,
            "genres" => Self::Genres,
            _ => return None,
        })
    }
}

/// Trace and span ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current tracing span.
    ///
    /// Returns `None` if the span has no valid OpenTelemetry context, which is
    /// the case whenever tracing is not initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes the issuing span the remote parent of spans created while the
    /// returned guard is held.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Identifies an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub payload: Payload,
    pub seq: u64,
    pub trace: Option<TraceContext>,
}

impl RequestTag {
    /// Tags a request, capturing the current trace.
    #[must_use]
    pub fn new(payload: Payload, seq: u64) -> Self {
        Self {
            payload,
            seq,
            trace: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.payload.channel()
    }

    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(KEY_PAYLOAD.to_string(), self.payload.as_str().to_string());
        context.insert(KEY_SEQ.to_string(), self.seq.to_string());
        if let Some(trace) = &self.trace {
            context.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Reads a tag back from a response context.
    ///
    /// Returns `None` for responses to requests this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let payload = Payload::parse(context.get(KEY_PAYLOAD)?)?;
        let seq = context.get(KEY_SEQ)?.parse().ok()?;
        let trace = match (context.get(KEY_TRACE_ID), context.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self {
            payload,
            seq,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_survives_context_map() {
        let tag = RequestTag {
            payload: Payload::Multi,
            seq: 17,
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let back = RequestTag::from_context(&tag.to_context()).unwrap();
        assert_eq!(back, tag);
        assert_eq!(back.channel(), Channel::Catalog);
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("something".to_string(), "else".to_string());
        assert!(RequestTag::from_context(&context).is_none());

        context.insert(KEY_PAYLOAD.to_string(), "movies".to_string());
        context.insert(KEY_SEQ.to_string(), "not-a-number".to_string());
        assert!(RequestTag::from_context(&context).is_none());
    }

    #[test]
    fn untraced_tag_captures_nothing_without_subscriber() {
        let tag = RequestTag::new(Payload::Detail, 1);
        assert!(tag.trace.is_none());
        assert_eq!(tag.channel(), Channel::Detail);
    }
}
