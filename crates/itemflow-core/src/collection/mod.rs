//! Fuentes de items.
//!
//! Una `Collection` produce la secuencia perezosa y finita de items de un
//! run. No se exige que sea reiniciable: el pipeline pide una secuencia nueva
//! en cada run y la consume una sola vez.

use futures::stream::{BoxStream, StreamExt};

use crate::constants::COLLECTION_KEY;
use crate::event::{slog, Slog};
use crate::model::{Context, Item};
use crate::naming::short_name_of;
use crate::slog::Slogger;

pub trait Collection<T>: Send + Sync {
    /// Nombre registrado en el campo `collection` de los eventos.
    fn name(&self) -> String {
        short_name_of::<Self>()
    }

    /// Secuencia de items para el contexto de un run.
    fn sequence<'a>(&'a self, ctx: &'a Context) -> BoxStream<'a, T>;
}

pub(crate) fn collection_slog<T>(collection: &dyn Collection<T>) -> Slog {
    slog([(COLLECTION_KEY, collection.name())])
}

/// Secuencia de la colección con un evento "success" por item emitido.
///
/// El scope de cada item se abre sin "starting": la emisión en sí es el
/// trabajo que se registra.
pub(crate) fn sourced<'a, T: Item>(collection: &'a dyn Collection<T>,
                                   ctx: &'a Context,
                                   slogger: &'a Slogger)
                                   -> BoxStream<'a, T> {
    let fields = collection_slog(collection);
    collection.sequence(ctx)
              .then(move |item| {
                  let fields = fields.clone();
                  async move { slogger.begin_quiet(fields).await.succeed(item).await }
              })
              .boxed()
}
