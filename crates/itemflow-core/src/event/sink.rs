use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::LogRecord;

/// Destino de los eventos estructurados.
///
/// Las implementaciones deben tolerar `emit` concurrente desde muchas
/// unidades de trabajo; cada llamada escribe un record completo.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);

    /// Vacía buffers pendientes. Se invoca al cerrar el proceso.
    fn flush(&self) {}
}

/// Sink que escribe una línea JSON por evento en cualquier `Write`.
pub struct WriterSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl WriterSink {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self { out: Mutex::new(Box::new(out)) }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl LogSink for WriterSink {
    fn emit(&self, record: &LogRecord) {
        let line = match record.to_line() {
            Ok(line) => line,
            Err(e) => {
                log::warn!("dropping log record that failed to serialize: {e}");
                return;
            }
        };
        // El lock se suelta antes de avisar: `log` puede volver a este sink.
        let written = writeln!(self.out.lock().unwrap_or_else(PoisonError::into_inner), "{line}");
        if let Err(e) = written {
            log::warn!("log sink write failed: {e}");
        }
    }

    fn flush(&self) {
        let flushed = self.out.lock().unwrap_or_else(PoisonError::into_inner).flush();
        if let Err(e) = flushed {
            log::warn!("log sink flush failed: {e}");
        }
    }
}

impl std::fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

/// Sink en memoria (append-only), pensado para tests y diagnósticos.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia de los records emitidos, en orden de emisión.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Records cuyo campo `key` vale exactamente `value`.
    pub fn events_with(&self, key: &str, value: impl Into<Value>) -> Vec<LogRecord> {
        let value = value.into();
        self.records()
            .into_iter()
            .filter(|r| r.get(key) == Some(&value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
    }
}
