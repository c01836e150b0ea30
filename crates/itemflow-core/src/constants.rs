//! Claves y valores estables de los eventos estructurados.
//!
//! Forman parte del contrato observable: cualquier consumidor del stream de
//! logs filtra por estas claves.

pub const STATUS_KEY: &str = "status";
pub const RESULT_KEY: &str = "result";
pub const DETAIL_KEY: &str = "detail";

pub const STATUS_STARTING: &str = "starting";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

pub const STEP_KEY: &str = "step";
pub const HANDLER_KEY: &str = "handler";
pub const ITEM_KEY: &str = "item";
pub const COLLECTION_KEY: &str = "collection";
pub const PIPELINE_KEY: &str = "pipeline";
pub const UOW_KEY: &str = "uow";

/// Tipo de error registrado cuando un scope se descarta sin cerrarse
/// (future cancelado o pánico en curso).
pub const CANCELLED_KIND: &str = "Cancelled";

/// Tipo de error registrado cuando un handler entra en pánico.
pub const PANIC_KIND: &str = "Panic";
