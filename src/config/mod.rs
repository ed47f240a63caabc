use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub coach: CoachConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки вагона: квота приоритетных мест и демо-бронь при сбросе
#[derive(Debug, Clone, Deserialize)]
pub struct CoachConfig {
    /// Сколько первых рядов отведено под приоритетную квоту.
    pub priority_quota_rows: usize,
    /// Место `n` предзабронировано, если `n % prebook_modulus == prebook_residue`.
    /// Ноль отключает предварительную бронь.
    pub prebook_modulus: u32,
    pub prebook_residue: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            priority_quota_rows: 1,
            prebook_modulus: 9,
            prebook_residue: 5,
        }
    }
}

impl CoachConfig {
    /// Квота не может занимать больше рядов, чем есть в вагоне.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = crate::services::seat_map::ROW_COUNT;
        if self.priority_quota_rows > max {
            return Err(ConfigError::QuotaRows { max, got: self.priority_quota_rows });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("PRIORITY_QUOTA_ROWS must be at most {max}, got {got}")]
    QuotaRows { max: usize, got: usize },
}

fn var_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = CoachConfig::default();

        let coach = CoachConfig {
            priority_quota_rows: parse_var(
                "PRIORITY_QUOTA_ROWS",
                &defaults.priority_quota_rows.to_string(),
            )?,
            prebook_modulus: parse_var("PREBOOK_MODULUS", &defaults.prebook_modulus.to_string())?,
            prebook_residue: parse_var("PREBOOK_RESIDUE", &defaults.prebook_residue.to_string())?,
        };

        coach.validate()?;

        Ok(Config {
            app: AppConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var("PORT", "5000")?,
                environment: var_or("ENVIRONMENT", "development"),
                rust_log: var_or("RUST_LOG", "coach_reservations=debug,tower_http=debug"),
            },
            coach,
        })
    }
}
