//! Handlers aritméticos sobre enteros.
//!
//! Son puros: no leen ni escriben estado externo, así que repetir un run con
//! el mismo contexto produce la misma salida.

use std::sync::Arc;

use itemflow_core::{Context, HandlerError};

/// Límite superior aceptado por `double_up_to_five`.
pub const DOUBLE_LIMIT: i64 = 5;

/// Duplica el valor; rechaza valores mayores que 5.
pub async fn double_up_to_five(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    if item > DOUBLE_LIMIT {
        return Err(HandlerError::rejected(format!("value {item} not allowed: greater than {DOUBLE_LIMIT}")));
    }
    checked(item.checked_mul(2), item, "* 2")
}

pub async fn add_three(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    checked(item.checked_add(3), item, "+ 3")
}

/// Multiplica por 7; rechaza valores negativos.
pub async fn times_seven_non_negative(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    if item < 0 {
        return Err(HandlerError::rejected(format!("value {item} not allowed: less than 0")));
    }
    checked(item.checked_mul(7), item, "* 7")
}

/// Suma el payload entero del contexto.
pub async fn add_context_data(ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    let offset: i64 = ctx.data_as().map_err(HandlerError::wrap)?;
    checked(item.checked_add(offset), item, "+ context data")
}

fn checked(result: Option<i64>, item: i64, op: &str) -> Result<i64, HandlerError> {
    result.ok_or_else(|| HandlerError::invalid(format!("overflow computing {item} {op}")))
}
