use crate::config::TargetConfig;
use crate::dimensions::format_dimensions;
use cbmon_common::types::{MetricRecord, SinkRecord};
use cbmon_common::{METRIC_TYPE_GAUGE, SERVICE_NAME};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Destination for finished metrics. Delivery, batching and retries are the
/// sink's business.
pub trait MetricSink: Send + Sync {
    fn emit(&self, record: SinkRecord) -> anyhow::Result<()>;
}

/// Turns a target's [`MetricRecord`]s into [`SinkRecord`]s and hands them to
/// the sink.
pub struct Emitter {
    sink: Arc<dyn MetricSink>,
    field_length: usize,
    interval_secs: u64,
}

impl Emitter {
    pub fn new(sink: Arc<dyn MetricSink>, config: &TargetConfig) -> Self {
        Self {
            sink,
            field_length: config.field_length,
            interval_secs: config.interval_secs(),
        }
    }

    pub fn to_sink_record(&self, record: &MetricRecord, collected_at: DateTime<Utc>) -> SinkRecord {
        SinkRecord {
            plugin_name: SERVICE_NAME.to_string(),
            metric_type: METRIC_TYPE_GAUGE.to_string(),
            metric_name: record.name.clone(),
            tag_string: format_dimensions(&record.dimensions, self.field_length),
            values: vec![record.value],
            interval: self.interval_secs,
            collected_at,
        }
    }

    /// Emits every record and returns how many the sink accepted. A refused
    /// record is logged and does not stop the rest.
    pub fn emit_all(&self, records: &[MetricRecord]) -> usize {
        let now = Utc::now();
        let mut accepted = 0;
        for record in records {
            let sink_record = self.to_sink_record(record, now);
            tracing::debug!(
                metric = %sink_record.metric_name,
                tags = %sink_record.tag_string,
                value = record.value,
                "Emitting metric"
            );
            match self.sink.emit(sink_record) {
                Ok(()) => accepted += 1,
                Err(e) => tracing::warn!(metric = %record.name, error = %e, "Metric sink rejected record"),
            }
        }
        accepted
    }
}
