use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use turntable::CarouselConfig;
use turntable::texture::ImagePath;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SlideTitle(String);

turntable::impl_string_newtype!(SlideTitle);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlideConfig {
    pub front: ImagePath,
    /// Defaults to the front image.
    pub back: Option<ImagePath>,
    pub title: Option<SlideTitle>,
}

impl SlideConfig {
    pub fn back(&self) -> &ImagePath {
        self.back.as_ref().unwrap_or(&self.front)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    /// Downward camera tilt in degrees.
    pub pitch: f64,
    /// Pixels per world unit at the reference height below.
    pub zoom: f64,
    /// Window height at which `zoom` applies; the ring scales with the window.
    pub reference_height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pitch: 12.0,
            zoom: 0.75,
            reference_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub slides: Vec<SlideConfig>,
}

impl AppConfig {
    /// Front and back image paths, resolved against `base` when relative.
    pub fn image_paths(&self, base: &Path) -> (Vec<ImagePath>, Vec<ImagePath>) {
        self.slides
            .iter()
            .map(|s| (resolve(base, &s.front), resolve(base, s.back())))
            .unzip()
    }

    /// Slide titles; blank ones count as missing.
    pub fn titles(&self) -> Vec<Option<SlideTitle>> {
        self.slides
            .iter()
            .map(|s| s.title.clone().filter(|t| !t.is_blank()))
            .collect()
    }
}

fn resolve(base: &Path, path: &ImagePath) -> ImagePath {
    let p = Path::new(path.as_str());
    if p.is_absolute() {
        path.clone()
    } else {
        ImagePath::new(base.join(p).to_string_lossy())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "turntable", "carousel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Directory relative slide paths are resolved against.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    Ok(path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default())
}

/// `CAROUSEL_<SECTION>__<KEY>`, e.g. `CAROUSEL_CAROUSEL__AUTO_SPEED`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CAROUSEL")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, writing the commented default on first run.
pub fn load_or_setup() -> AppConfig {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(written) => log::info!("Wrote default config to {}", written.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using built-in defaults: {}", e);
            AppConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
