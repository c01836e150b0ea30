//! Tipos de valor compartidos por el pipeline.

mod context;

pub use context::Context;

use serde::Serialize;

/// Cota para los valores que fluyen por el pipeline.
///
/// `Serialize` permite incluir el valor en los eventos; `Send + Sync +
/// 'static` permite compartir pasos y futures entre unidades de trabajo.
pub trait Item: Serialize + Send + Sync + 'static {}

impl<T> Item for T where T: Serialize + Send + Sync + 'static {}

/// Serializa un valor para un evento sin abortar el registro si falla.
pub(crate) fn to_log_value<V: Serialize + ?Sized>(value: &V) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| serde_json::Value::String(format!("<unserializable: {e}>")))
}
