//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del monitor: URL de la API de despacho,
//! intervalo de refresco, archivo de sesión, idioma y aviso sonoro.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://control.puntoexacto.ec";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_VIEWPORT_ROWS: usize = 8;
pub const DEFAULT_CHIME_FILE: &str = "audio/station.mp3";

/// Idioma de las etiquetas que se muestran en pantalla
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    #[default]
    Es,
    En,
}

impl DisplayLocale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "es" | "es-ec" | "spanish" => Some(DisplayLocale::Es),
            "en" | "en-us" | "english" => Some(DisplayLocale::En),
            _ => None,
        }
    }

    pub fn ahead_label(&self) -> &'static str {
        match self {
            DisplayLocale::Es => "Adelante",
            DisplayLocale::En => "Ahead",
        }
    }

    pub fn behind_label(&self) -> &'static str {
        match self {
            DisplayLocale::Es => "Atrás",
            DisplayLocale::En => "Behind",
        }
    }
}

/// Configuración del aviso sonoro
#[derive(Debug, Clone)]
pub struct ChimeConfig {
    pub enabled: bool,
    /// Reproductor externo (por ejemplo `aplay` o `afplay`); sin él se usa la campana de la terminal
    pub command: Option<String>,
    pub file: PathBuf,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            file: PathBuf::from(DEFAULT_CHIME_FILE),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub refresh_interval: Duration,
    pub http_timeout: Option<Duration>,
    pub session_file: PathBuf,
    pub locale: DisplayLocale,
    pub viewport_rows: usize,
    pub chime: ChimeConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            http_timeout: None,
            session_file: default_session_file(),
            locale: DisplayLocale::default(),
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
            chime: ChimeConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = get("DISPATCH_API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(config_error("DISPATCH_API_BASE_URL", "must start with http:// or https://"));
        }

        let refresh_interval = match get("REFRESH_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(parse_positive(&raw, "REFRESH_INTERVAL_SECS")?),
            None => defaults.refresh_interval,
        };

        let http_timeout = match get("DISPATCH_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_positive(&raw, "DISPATCH_HTTP_TIMEOUT_SECS")?)),
            None => None,
        };

        let session_file = get("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let locale = match get("DASHBOARD_LOCALE") {
            Some(raw) => DisplayLocale::parse(&raw)
                .ok_or_else(|| config_error("DASHBOARD_LOCALE", "expected 'es' or 'en'"))?,
            None => defaults.locale,
        };

        let viewport_rows = match get("VIEWPORT_ROWS") {
            Some(raw) => parse_positive(&raw, "VIEWPORT_ROWS")? as usize,
            None => defaults.viewport_rows,
        };

        let chime = ChimeConfig {
            enabled: match get("CHIME_ENABLED") {
                Some(raw) => parse_bool(&raw, "CHIME_ENABLED")?,
                None => true,
            },
            command: get("CHIME_COMMAND"),
            file: get("CHIME_FILE").map(PathBuf::from).unwrap_or(defaults.chime.file),
        };

        Ok(Self {
            api_base_url,
            refresh_interval,
            http_timeout,
            session_file,
            locale,
            viewport_rows,
            chime,
        })
    }
}

fn default_session_file() -> PathBuf {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    home.join(".despacho_monitor").join("session")
}

fn parse_positive(raw: &str, variable: &str) -> AppResult<u64> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(config_error(variable, "must be a positive number")),
    }
}

fn parse_bool(raw: &str, variable: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(config_error(variable, "must be true or false")),
    }
}
