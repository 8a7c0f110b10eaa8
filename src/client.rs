//! Cliente HTTP para la API de despacho
//!
//! Este módulo contiene el cliente que consulta `GET /api/get_despacho/{unitId}`
//! y clasifica la respuesta: sesión expirada, error del servidor, cuerpo
//! inválido o despacho crudo listo para normalizar.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::EnvironmentConfig;
use crate::models::RawDispatchPayload;
use crate::utils::errors::{AppError, AppResult, DispatchError};

const USER_AGENT: &str = concat!("DespachoMonitor/", env!("CARGO_PKG_VERSION"));

/// URL de despacho para una unidad, con el identificador codificado
pub fn dispatch_url(base_url: &str, unit_id: &str) -> String {
    format!(
        "{}/api/get_despacho/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(unit_id)
    )
}

/// Cliente HTTP para la API de despacho
#[derive(Clone)]
pub struct DispatchApiClient {
    client: Client,
    base_url: String,
}

impl DispatchApiClient {
    /// Crear cliente a partir de la configuración del entorno
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::with_base_url(config.api_base_url.clone(), config.http_timeout)
    }

    /// Crear cliente con URL base y timeout opcional
    ///
    /// Sin timeout la petición depende de los valores por defecto del transporte.
    pub fn with_base_url(base_url: String, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Obtener el despacho crudo de una unidad
    pub async fn get_dispatch(&self, unit_id: &str) -> Result<RawDispatchPayload, DispatchError> {
        let url = dispatch_url(&self.base_url, unit_id);
        log::debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        log::debug!("📡 Respuesta de despacho: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(DispatchError::SessionExpired);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| format!("Error de API: {}", status.as_u16()));
            log::error!("❌ API de despacho respondió {}: {}", status, body);
            return Err(DispatchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        RawDispatchPayload::from_json(&body)
    }
}
