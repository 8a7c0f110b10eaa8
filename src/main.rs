use std::sync::Arc;

use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use despacho_monitor::app::Monitor;
use despacho_monitor::client::DispatchApiClient;
use despacho_monitor::config::EnvironmentConfig;
use despacho_monitor::services::{chime_from_config, DispatchNormalizer, DispatchService};
use despacho_monitor::session::SessionStore;

const USAGE: &str = "Uso: despacho_monitor [watch | login <unidad> | logout | status]";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (stderr, para no mezclarse con el tablero)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EnvironmentConfig::from_env()?;
    let store = SessionStore::new(config.session_file.clone());
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("login") => {
            let unit_id = args.get(1).ok_or_else(|| anyhow!(USAGE))?;
            let session = store.login(unit_id).await?;
            println!("✅ Sesión iniciada para la unidad {}", session.unit_id);
            Ok(())
        }
        Some("logout") => {
            store.clear().await?;
            println!("👋 Sesión cerrada");
            Ok(())
        }
        Some("status") => build_monitor(config, store)?.print_status().await.map_err(Into::into),
        None | Some("watch") => {
            info!("🚌 Monitor de Despacho");
            info!("   API: {}", config.api_base_url);
            info!("   Refresco cada {}s", config.refresh_interval.as_secs());
            info!("   Sesión: {}", store.path().display());
            build_monitor(config, store)?.run().await.map_err(Into::into)
        }
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => Err(anyhow!("Comando desconocido '{}'. {}", other, USAGE)),
    }
}

fn build_monitor(config: EnvironmentConfig, store: SessionStore) -> Result<Monitor> {
    let client = DispatchApiClient::new(&config)?;
    let source = DispatchService::new(client, DispatchNormalizer::new(config.locale));
    let chime = chime_from_config(&config.chime);
    Ok(Monitor::new(config, Arc::new(source), store, chime))
}
