use serde::Serialize;
use serde_json::Value;

use super::Slogger;
use crate::constants::{CANCELLED_KIND, DETAIL_KEY, RESULT_KEY, STATUS_ERROR, STATUS_KEY, STATUS_STARTING, STATUS_SUCCESS};
use crate::errors::ErrorKind;
use crate::event::{Level, Slog};
use crate::model::to_log_value;

/// Estado de un `Scope`.
///
/// Las transiciones válidas son:
/// - `NotStarted` -> `Started` (al abrirse)
/// - `Started` -> `Closed` (success, error o descarte)
///
/// `Closed` se alcanza una única vez: los métodos terminales consumen el
/// scope, así que un segundo evento terminal no compila.
///
/// `NotStarted` sólo existe dentro de `Scope::open`; fuera del módulo un
/// scope siempre está `Started` o `Closed`. Se mantiene para nombrar el
/// ciclo de vida completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    NotStarted,
    Started,
    Closed,
}

/// Unidad de trabajo enmarcada por eventos estructurados.
///
/// Si el scope se descarta estando `Started` (future cancelado, pánico en
/// curso) emite el evento "error" con `result: "Cancelled"` desde `Drop`.
#[derive(Debug)]
pub struct Scope {
    slogger: Slogger,
    fields: Slog,
    skip_enter: bool,
    state: ScopeState,
}

impl Scope {
    pub(super) async fn open(slogger: Slogger, fields: Slog, skip_enter: bool) -> Self {
        let mut scope = Self { slogger,
                               fields,
                               skip_enter,
                               state: ScopeState::NotStarted };
        scope.state = ScopeState::Started;
        if !scope.skip_enter {
            scope.slogger.info(scope.event(STATUS_STARTING, [])).await;
        }
        scope
    }

    pub fn fields(&self) -> &Slog {
        &self.fields
    }

    pub fn state(&self) -> ScopeState {
        self.state
    }

    pub fn skips_enter(&self) -> bool {
        self.skip_enter
    }

    /// Cierra el scope con éxito y devuelve `result` sin modificar.
    pub async fn succeed<R: Serialize>(mut self, result: R) -> R {
        self.state = ScopeState::Closed;
        let event = self.event(STATUS_SUCCESS, [(RESULT_KEY, to_log_value(&result))]);
        self.slogger.info(event).await;
        result
    }

    /// Cierra el scope con error. El error sigue siendo del llamador.
    pub async fn fail<E: ErrorKind + ?Sized>(mut self, err: &E) {
        self.state = ScopeState::Closed;
        let event = self.event(STATUS_ERROR,
                               [(RESULT_KEY, Value::from(err.kind().into_owned())),
                                (DETAIL_KEY, Value::from(err.to_string()))]);
        self.slogger.error(event).await;
    }

    /// Cierra el scope según el resultado y lo devuelve intacto.
    pub async fn settle<T, E>(self, outcome: Result<T, E>) -> Result<T, E>
        where T: Serialize,
              E: ErrorKind
    {
        match outcome {
            Ok(value) => Ok(self.succeed(value).await),
            Err(err) => {
                self.fail(&err).await;
                Err(err)
            }
        }
    }

    fn event<const N: usize>(&self, status: &str, extra: [(&str, Value); N]) -> Slog {
        let mut event = self.fields.clone();
        for (key, value) in extra {
            event.insert(key.to_string(), value);
        }
        event.insert(STATUS_KEY.to_string(), Value::from(status));
        event
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.state == ScopeState::Started {
            self.state = ScopeState::Closed;
            let event = self.event(STATUS_ERROR,
                                   [(RESULT_KEY, Value::from(CANCELLED_KIND)),
                                    (DETAIL_KEY, Value::from("scope dropped before completion"))]);
            self.slogger.emit(Level::Error, event);
        }
    }
}
