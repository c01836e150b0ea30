use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::HandlerError;
use crate::model::Context;
use crate::naming::short_name_of;

/// Transformación asíncrona de un item.
///
/// Cualquier `async fn(Arc<Context>, T) -> Result<T, HandlerError>` (o closure
/// equivalente) implementa el trait. Implementaciones manuales sirven para
/// handlers con estado propio.
#[async_trait]
pub trait Handler<T>: Send + Sync
    where T: Send + 'static
{
    async fn handle(&self, ctx: Arc<Context>, item: T) -> Result<T, HandlerError>;

    /// Identificador registrado en el campo `handler` de cada evento.
    fn handler_name(&self) -> String {
        short_name_of::<Self>()
    }
}

#[async_trait]
impl<T, F, Fut> Handler<T> for F
    where T: Send + 'static,
          F: Fn(Arc<Context>, T) -> Fut + Send + Sync,
          Fut: Future<Output = Result<T, HandlerError>> + Send
{
    async fn handle(&self, ctx: Arc<Context>, item: T) -> Result<T, HandlerError> {
        (self)(ctx, item).await
    }
}
