//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del monitor de despacho:
//! errores de la API de despacho (sesión, servidor, cuerpo inválido)
//! y errores locales (configuración, archivo de sesión, terminal).

use thiserror::Error;

/// Errores al consultar la API de despacho
#[derive(Error, Debug)]
pub enum DispatchError {
    /// HTTP 401: la sesión de la unidad ya no es válida
    #[error("La sesión ha expirado. Por favor, inicie sesión de nuevo.")]
    SessionExpired,

    #[error("Error de API ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Error de red: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Respuesta inválida de la API: {0}")]
    MalformedBody(String),

    #[error("No se encontraron datos de despacho para la unidad {unit_id}. La respuesta puede no ser válida.")]
    NoData { unit_id: String },
}

impl DispatchError {
    /// Los errores de sesión siempre terminan la sesión actual
    pub fn is_session_error(&self) -> bool {
        matches!(self, DispatchError::SessionExpired)
    }

    /// Código corto para logs y avisos
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::SessionExpired => "SESSION_EXPIRED",
            DispatchError::Server { .. } => "SERVER_ERROR",
            DispatchError::Transport(_) => "TRANSPORT_ERROR",
            DispatchError::MalformedBody(_) => "MALFORMED_BODY",
            DispatchError::NoData { .. } => "NO_DATA",
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, message: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, message))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_classification() {
        assert!(DispatchError::SessionExpired.is_session_error());
        assert!(!DispatchError::Server { status: 500, body: "boom".into() }.is_session_error());
        assert!(!DispatchError::NoData { unit_id: "42".into() }.is_session_error());
    }

    #[test]
    fn test_server_error_message_includes_status() {
        let err = DispatchError::Server { status: 503, body: "mantenimiento".into() };
        assert_eq!(err.to_string(), "Error de API (503): mantenimiento");
        assert_eq!(err.code(), "SERVER_ERROR");
    }

    #[test]
    fn test_config_error_helper() {
        let err = config_error("REFRESH_INTERVAL_SECS", "must be a positive number");
        assert_eq!(
            err.to_string(),
            "Configuration error: REFRESH_INTERVAL_SECS: must be a positive number"
        );
    }
}
