use cbmon_collector::emit::MetricSink;
use cbmon_common::types::SinkRecord;
use std::io::Write;
use std::sync::Mutex;

/// Writes each record as one JSON object per line.
pub struct JsonLineSink<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonLineSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> MetricSink for JsonLineSink<W> {
    fn emit(&self, record: SinkRecord) -> anyhow::Result<()> {
        let line = serde_json::to_string(&record)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("sink writer lock poisoned"))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
