use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use storage::{normalize_database_url, DEFAULT_DATABASE_URL};

pub const SETTINGS_FILE: &str = "erp.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub window_title: String,
    /// Show an alert when storage refuses a save instead of ignoring it.
    pub alertar_fallo_guardado: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            window_title: "Gestión de productos".into(),
            alertar_fallo_guardado: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    database_url: Option<String>,
    window_title: Option<String>,
    alertar_fallo_guardado: Option<bool>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    match read_file_settings(Path::new(SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_settings(&mut settings, file_cfg),
        Ok(None) => {}
        Err(err) => tracing::warn!("ignoring {SETTINGS_FILE}: {err:#}"),
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.database_url = normalize_database_url(&settings.database_url);
    settings
}

fn read_file_settings(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.database_url {
        settings.database_url = v;
    }
    if let Some(v) = file_cfg.window_title {
        settings.window_title = v;
    }
    if let Some(v) = file_cfg.alertar_fallo_guardado {
        settings.alertar_fallo_guardado = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = var("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = var("APP__ALERTAR_FALLO_GUARDADO") {
        match parse_flag(&v) {
            Some(flag) => settings.alertar_fallo_guardado = flag,
            None => tracing::warn!(value = %v, "APP__ALERTAR_FALLO_GUARDADO is not a boolean"),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
