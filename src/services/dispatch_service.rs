//! Servicio de despacho
//!
//! Une el cliente HTTP con el normalizador: pide el despacho de la unidad y
//! devuelve el modelo listo para mostrar, o el error clasificado.

use async_trait::async_trait;

use crate::client::DispatchApiClient;
use crate::models::DispatchModel;
use crate::services::normalizer::DispatchNormalizer;
use crate::utils::errors::DispatchError;

/// Fuente de datos de despacho
#[async_trait]
pub trait DispatchSource: Send + Sync {
    async fn fetch_dispatch(&self, unit_id: &str) -> Result<DispatchModel, DispatchError>;
}

#[derive(Clone)]
pub struct DispatchService {
    client: DispatchApiClient,
    normalizer: DispatchNormalizer,
}

impl DispatchService {
    pub fn new(client: DispatchApiClient, normalizer: DispatchNormalizer) -> Self {
        Self { client, normalizer }
    }
}

#[async_trait]
impl DispatchSource for DispatchService {
    async fn fetch_dispatch(&self, unit_id: &str) -> Result<DispatchModel, DispatchError> {
        let raw = self.client.get_dispatch(unit_id).await?;

        let model = self
            .normalizer
            .normalize(raw, unit_id)
            .ok_or_else(|| DispatchError::NoData {
                unit_id: unit_id.to_string(),
            })?;

        log::info!(
            "📋 Despacho de la unidad {}: ruta '{}', {} puntos de control",
            unit_id,
            model.route_info.route_name(),
            model.control_points.len()
        );
        Ok(model)
    }
}
