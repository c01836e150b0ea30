//! Resultado detallado de un run (`Pipeline::settle`).

use serde_json::Value;
use thiserror::Error;

use crate::errors::HandlerError;
use crate::event::{slog, Slog};

/// Por qué un item no llegó al final de la cadena.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("step `{step}` (#{step_index}) failed: {error}")]
pub struct ItemFailure {
    /// Nombre del step cuyo handler falló.
    pub step: String,
    /// Posición del step en la lista del pipeline.
    pub step_index: usize,
    #[source]
    pub error: HandlerError,
}

/// Desenlace de la unidad de trabajo de un item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome<T> {
    /// Posición del item en la emisión de la colección.
    pub index: usize,
    /// Valor de entrada tal como se registró en los eventos.
    pub input: Value,
    pub result: Result<T, ItemFailure>,
}

impl<T> ItemOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Todos los desenlaces de un run, en el orden de emisión de la colección.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport<T> {
    outcomes: Vec<ItemOutcome<T>>,
}

impl<T> RunReport<T> {
    pub(crate) fn new(mut outcomes: Vec<ItemOutcome<T>>) -> Self {
        outcomes.sort_by_key(|o| o.index);
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ItemOutcome<T>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Fallos con el índice de emisión del item.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ItemFailure)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|f| (o.index, f)))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Campos del evento de cierre del run.
    pub fn summary(&self) -> Slog {
        slog([("succeeded", self.succeeded()), ("failed", self.failed())])
    }

    /// Descarta los fallos y devuelve los valores finales en orden.
    pub fn into_successes(self) -> Vec<T> {
        self.outcomes.into_iter().filter_map(|o| o.result.ok()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure(step: &str, step_index: usize) -> ItemFailure {
        ItemFailure { step: step.into(),
                      step_index,
                      error: HandlerError::rejected("nope") }
    }

    fn report() -> RunReport<i64> {
        RunReport::new(vec![ItemOutcome { index: 2, input: json!(4), result: Ok(11) },
                            ItemOutcome { index: 0, input: json!(2), result: Ok(7) },
                            ItemOutcome { index: 1, input: json!(10), result: Err(failure("step1", 0)) }])
    }

    #[test]
    fn outcomes_are_sorted_by_emission_index() {
        let indexes: Vec<usize> = report().outcomes().iter().map(|o| o.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn counts_and_summary() {
        let r = report();
        assert_eq!(r.len(), 3);
        assert_eq!(r.succeeded(), 2);
        assert_eq!(r.failed(), 1);
        assert_eq!(r.summary(), slog([("succeeded", 2), ("failed", 1)]));
    }

    #[test]
    fn failures_keep_item_index() {
        let r = report();
        let failures: Vec<_> = r.failures().collect();
        assert_eq!(failures, vec![(1, &failure("step1", 0))]);
        assert_eq!(failures[0].1.to_string(), "step `step1` (#0) failed: nope");
    }

    #[test]
    fn into_successes_drops_failures_in_order() {
        assert_eq!(report().into_successes(), vec![7, 11]);
    }
}
