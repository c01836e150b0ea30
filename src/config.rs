//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`AppConfig`) que se inicializa una sola vez por proceso (`load`).
//!
//! Variables reconocidas (todas opcionales):
//! - `ITEMFLOW_UOW`: identificador de la unidad de trabajo (uuid v4 si falta).
//! - `ITEMFLOW_DATA`: payload entero del contexto (por defecto `1`).
//! - `ITEMFLOW_LOG_LEVEL`: `INFO` | `ERROR` (por defecto `INFO`).
//! - `ITEMFLOW_LOG_TARGET`: `stdout` | `stderr` (por defecto `stdout`).
//! - `ITEMFLOW_SCENARIO`: `a` | `b` | `c` (por defecto `b`).
use std::str::FromStr;

use itemflow_adapters::Scenario;
use itemflow_core::Level;
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::errors::AppError;

pub const ENV_UOW: &str = "ITEMFLOW_UOW";
pub const ENV_DATA: &str = "ITEMFLOW_DATA";
pub const ENV_LOG_LEVEL: &str = "ITEMFLOW_LOG_LEVEL";
pub const ENV_LOG_TARGET: &str = "ITEMFLOW_LOG_TARGET";
pub const ENV_SCENARIO: &str = "ITEMFLOW_SCENARIO";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Parámetros del run (contexto y pipeline a ejecutar).
    pub run: RunConfig,
    /// Destino y nivel mínimo de los eventos estructurados.
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub uow: String,
    pub data: i64,
    pub scenario: Scenario,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub level: Level,
    pub target: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

impl FromStr for LogTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(LogTarget::Stdout),
            "stderr" => Ok(LogTarget::Stderr),
            other => Err(format!("unknown log target `{other}`")),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { run: RunConfig { uow: Uuid::new_v4().to_string(),
                                data: 1,
                                scenario: Scenario::B },
               log: LogConfig { level: Level::Info,
                                target: LogTarget::Stdout } }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso (tras cargar `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración con una función de búsqueda arbitraria.
    /// Las variables ausentes toman su valor por defecto; las presentes pero
    /// inválidas producen `AppError::Config`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let uow = lookup(ENV_UOW).filter(|v| !v.trim().is_empty())
                                 .unwrap_or(defaults.run.uow);
        Ok(Self { run: RunConfig { uow,
                                   data: parse_or(&lookup, ENV_DATA, defaults.run.data)?,
                                   scenario: parse_or(&lookup, ENV_SCENARIO, defaults.run.scenario)? },
                  log: LogConfig { level: parse_or(&lookup, ENV_LOG_LEVEL, defaults.log.level)?,
                                   target: parse_or(&lookup, ENV_LOG_TARGET, defaults.log.target)? } })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
    where F: Fn(&str) -> Option<String>,
          T: FromStr,
          T::Err: std::fmt::Display
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim()
                        .parse()
                        .map_err(|e| AppError::Config(format!("{key}={raw}: {e}"))),
    }
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Configuración del proceso, evaluada una sola vez.
pub fn load() -> Result<&'static AppConfig, AppError> {
    CONFIG.get_or_try_init(AppConfig::from_env)
}
