use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

pub const APP_FOLDER_NAME: &str = "EvolveEd";

fn default_submit_delay_ms() -> u64 {
    2000
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FormSettings {
    /// How long a simulated save takes.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UiSettings {
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
    #[serde(default)]
    pub remember_last_tab: bool,
    #[serde(default)]
    pub last_tab: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub version: String,
    pub base_path: String,
    pub mode: String,
    #[serde(default)]
    pub last_institution: Option<String>,
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    fn initial(base: &Path) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            base_path: base.to_string_lossy().to_string(),
            mode: "gui".to_string(),
            last_institution: None,
            form: FormSettings::default(),
            ui: UiSettings {
                remember_last_tab: true,
                ..UiSettings::default()
            },
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.form.submit_delay_ms)
    }

    /// Tab to open a dashboard on, when the user wants it remembered.
    pub fn restored_tab(&self) -> Option<&str> {
        if self.ui.remember_last_tab {
            self.ui.last_tab.as_deref()
        } else {
            None
        }
    }
}

pub fn default_base_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(dir) = exe_dir {
        return dir.join("data");
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER_NAME)
}

pub fn ensure_base_folders(base: &Path) -> io::Result<()> {
    let dirs = [
        base.to_path_buf(),
        base.join("config"),
        base.join("runtime"),
        base.join("logs"),
    ];

    for d in dirs {
        if !d.exists() {
            fs::create_dir_all(&d)?;
        }
    }

    Ok(())
}

pub fn settings_path(base: &Path) -> PathBuf {
    base.join("config").join("settings.json")
}

fn encode(settings: &Settings) -> io::Result<String> {
    serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON encode error: {e}")))
}

pub fn load_or_init_settings(base: &Path) -> io::Result<Settings> {
    let config_path = settings_path(base);

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON parse error: {e}")))?;

        if settings.base_path != base.to_string_lossy() {
            warn!(
                "[settings] base_path {} does not match {}; using the latter",
                settings.base_path,
                base.display()
            );
            settings.base_path = base.to_string_lossy().to_string();
        }
        return Ok(settings);
    }

    let settings = Settings::initial(base);
    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&config_path, encode(&settings)?)?;
    info!("[settings] Created {}", config_path.display());

    Ok(settings)
}

pub fn save_settings(settings: &Settings, base: &Path) -> io::Result<()> {
    let config_path = settings_path(base);
    fs::write(&config_path, encode(settings)?)?;
    Ok(())
}
