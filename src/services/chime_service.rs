//! Aviso sonoro de cambio de punto de control
//!
//! La reproducción es "disparar y olvidar": si falla se registra en el log y
//! no se reintenta; el próximo cambio de punto lo volverá a intentar.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use tokio::process::{Child, Command};

use crate::config::ChimeConfig;

pub trait Chime: Send + Sync {
    fn play(&self);
}

/// Campana de la terminal (`BEL`)
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            log::error!("🔇 Audio play failed: {}", e);
        }
    }
}

/// Reproductor externo, por ejemplo `aplay audio/station.mp3`
pub struct CommandChime {
    command: String,
    file: PathBuf,
    playing: Mutex<Option<Child>>,
}

impl CommandChime {
    pub fn new(command: String, file: PathBuf) -> Self {
        Self {
            command,
            file,
            playing: Mutex::new(None),
        }
    }
}

impl Chime for CommandChime {
    fn play(&self) {
        let mut playing = match self.playing.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Si sigue sonando, se reinicia desde el principio
        if let Some(mut child) = playing.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.start_kill();
            }
        }

        let spawned = Command::new(&self.command)
            .arg(&self.file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => *playing = Some(child),
            Err(e) => log::error!(
                "🔇 Audio play failed ({} {}): {}",
                self.command,
                self.file.display(),
                e
            ),
        }
    }
}

/// Sin sonido
pub struct SilentChime;

impl Chime for SilentChime {
    fn play(&self) {}
}

pub fn chime_from_config(config: &ChimeConfig) -> Arc<dyn Chime> {
    if !config.enabled {
        return Arc::new(SilentChime);
    }
    match &config.command {
        Some(command) => Arc::new(CommandChime::new(command.clone(), config.file.clone())),
        None => Arc::new(TerminalBell),
    }
}
