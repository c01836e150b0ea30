//! Puente entre la fachada `log` y el sink estructurado.
//!
//! Los diagnósticos internos (`log::debug!`, `log::warn!`…) salen por el
//! mismo `Slogger` que los scopes, como eventos `{target, message}`.
use itemflow_core::event::slog;
use itemflow_core::{Level, Slogger};
use log::{LevelFilter, Log, Metadata, Record};

/// Avisos del propio sink: van directo a stderr para no reentrar en él.
const SINK_TARGET: &str = "itemflow_core::event::sink";

pub struct SlogBridge {
    slogger: Slogger,
    max_level: LevelFilter,
}

impl SlogBridge {
    pub fn new(slogger: Slogger, max_level: LevelFilter) -> Self {
        Self { slogger, max_level }
    }

    /// Instala el puente como logger global del proceso.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max);
        Ok(())
    }
}

fn level_of(level: log::Level) -> Level {
    match level {
        log::Level::Error | log::Level::Warn => Level::Error,
        _ => Level::Info,
    }
}

impl Log for SlogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.target().starts_with(SINK_TARGET) {
            eprintln!("{} {}: {}", record.level(), record.target(), record.args());
            return;
        }
        let event = slog([("target", record.target().to_string()),
                          ("message", record.args().to_string())]);
        self.slogger.emit(level_of(record.level()), event);
    }

    fn flush(&self) {
        self.slogger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemflow_core::MemorySink;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn records_become_structured_events() {
        let sink = Arc::new(MemorySink::new());
        let bridge = SlogBridge::new(Slogger::new(sink.clone()), LevelFilter::Info);

        bridge.log(&Record::builder().level(log::Level::Warn)
                                     .target("itemflow_core::engine")
                                     .args(format_args!("slow item {}", 3))
                                     .build());
        bridge.log(&Record::builder().level(log::Level::Debug)
                                     .target("itemflow_core::engine")
                                     .args(format_args!("dropped"))
                                     .build());

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Error);
        assert_eq!(records[0].get("message"), Some(&json!("slow item 3")));
        assert_eq!(records[0].get("target"), Some(&json!("itemflow_core::engine")));
    }

    #[test]
    fn sink_diagnostics_bypass_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let bridge = SlogBridge::new(Slogger::new(sink.clone()), LevelFilter::Info);

        bridge.log(&Record::builder().level(log::Level::Warn)
                                     .target(SINK_TARGET)
                                     .args(format_args!("log sink write failed"))
                                     .build());
        assert!(sink.is_empty());
    }
}
