use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Contexto inmutable de una ejecución del pipeline.
///
/// Se crea una vez por run y se comparte (vía `Arc`) con todas las unidades
/// de trabajo. No expone ningún método que lo mute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    uow: String,
    data: Value,
}

impl Context {
    pub fn new(uow: impl Into<String>, data: impl Into<Value>) -> Self {
        Self { uow: uow.into(),
               data: data.into() }
    }

    /// Contexto con un identificador de unidad de trabajo aleatorio (uuid v4).
    pub fn generated(data: impl Into<Value>) -> Self {
        Self::new(Uuid::new_v4().to_string(), data)
    }

    /// Identificador de la unidad de trabajo.
    pub fn uow(&self) -> &str {
        &self.uow
    }

    /// Payload auxiliar opaco.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Decodifica el payload auxiliar a un tipo concreto.
    pub fn data_as<D: DeserializeOwned>(&self) -> Result<D, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}
