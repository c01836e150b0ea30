//! itemflow-adapters: colaboradores de referencia para el core.
//!
//! Este crate provee:
//! - Handlers aritméticos (`steps::arith`) usados por los escenarios de
//!   ejemplo: duplicar con rechazo de valores grandes, sumar 3, multiplicar
//!   por 7 con rechazo de negativos.
//! - Colecciones literales (`collections`): una lista fija de enteros y una
//!   variante genérica.
//! - `scenarios`: pipelines ensamblados listos para ejecutar.
//!
//! Nota: el core no conoce nada de esto; sólo consume `Handler` y
//! `Collection`.

pub mod collections;
pub mod scenarios;
pub mod steps;

pub use collections::{ItemCollection, LiteralCollection};
pub use scenarios::Scenario;
