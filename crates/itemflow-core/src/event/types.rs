use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, SecondsFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::constants::STATUS_KEY;

/// Campos de un evento. Conserva el orden de inserción en la salida.
pub type Slog = IndexMap<String, Value>;

/// Construye un `Slog` a partir de pares clave/valor.
pub fn slog<K, V, I>(pairs: I) -> Slog
    where I: IntoIterator<Item = (K, V)>,
          K: Into<String>,
          V: Into<Value>
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Nivel de un evento. El orden (`Info < Error`) se usa para filtrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(Level::Info),
            "ERROR" => Ok(Level::Error),
            other => Err(format!("unknown log level `{other}`")),
        }
    }
}

/// Un evento listo para el sink: `{"level", "timestamp", "event"}`.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: Level,
    #[serde(serialize_with = "iso_local")]
    pub timestamp: DateTime<Local>,
    pub event: Slog,
}

impl LogRecord {
    /// Record con el reloj de pared local en el momento de la emisión.
    pub fn now(level: Level, event: Slog) -> Self {
        Self { level,
               timestamp: Local::now(),
               event }
    }

    /// Serializa el record en una única línea JSON.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.event.get(key)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(STATUS_KEY).and_then(Value::as_str)
    }
}

fn iso_local<S: Serializer>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
}
