//! Nombres legibles a partir de `std::any::type_name`.

/// Recorta un nombre de tipo completo a su último segmento de ruta.
///
/// - `itemflow_adapters::steps::arith::add_three` -> `add_three`
/// - `my_crate::collections::LiteralCollection<i64>` -> `LiteralCollection`
/// - `my_crate::main::{{closure}}` -> `main::{{closure}}` (los closures no
///   tienen nombre propio, se conserva el segmento padre)
pub fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let mut segments = base.rsplit("::");
    match segments.next() {
        Some(last) if last.starts_with("{{") => match segments.next() {
            Some(parent) => format!("{parent}::{last}"),
            None => last.to_string(),
        },
        Some(last) => last.to_string(),
        None => base.to_string(),
    }
}

/// Nombre corto del tipo `T`.
pub fn short_name_of<T: ?Sized>() -> String {
    short_type_name(std::any::type_name::<T>())
}
