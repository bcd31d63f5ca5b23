use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use petal::icon::IconError;
use petal::menu::{CHILD_SPRING, HUB_SPRING};
use petal::{ChildIcon, FanConfig, IconSet, Layout, LayoutError, Point, SpringConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub child_count: usize,
    pub fly_out_radius: f64,
    pub separation_angle: f64,
    pub hub_diameter: f64,
    pub child_diameter: f64,
    pub hub_x: f64,
    pub hub_y: f64,
    pub child_spring: SpringConfig,
    pub hub_spring: SpringConfig,
    pub icons: Vec<ChildIcon>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            child_count: 5,
            fly_out_radius: 130.0,
            separation_angle: 40.0,
            hub_diameter: 90.0,
            child_diameter: 48.0,
            hub_x: 490.0,
            hub_y: 450.0,
            child_spring: CHILD_SPRING,
            hub_spring: HUB_SPRING,
            icons: IconSet::default().as_slice().to_vec(),
        }
    }
}

impl Config {
    pub fn layout(&self) -> Result<Layout, LayoutError> {
        let fan = FanConfig {
            child_count: self.child_count,
            fly_out_radius: self.fly_out_radius,
            separation_angle: self.separation_angle,
            child_diameter: self.child_diameter,
        };
        Layout::new(fan, Point::new(self.hub_x, self.hub_y), self.hub_diameter)
    }

    pub fn icon_set(&self) -> Result<IconSet, IconError> {
        IconSet::new(self.icons.clone())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.layout()?;
        self.icon_set()?;
        Ok(self)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid icons: {0}")]
    Icons(#[from] IconError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "bloom", "bloom").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn parse(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let config: Config = builder.build()?.try_deserialize()?;
    config.validated()
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    parse(
        config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(config::Environment::with_prefix("BLOOM")),
    )
}

/// Loads the user config, writing the commented default file on first run.
/// Any failure falls back to the built-in defaults.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::warn!("Using built-in defaults: {}", e);
        Config::default()
    })
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

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
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
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }
    log::debug!("Watching {}", config_dir.display());

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

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        parse(
            config::Config::builder()
                .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    #[test]
    fn test_default_file_matches_built_in_defaults() {
        assert_eq!(from_toml(DEFAULT_CONFIG).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = from_toml("child_count = 3\nicons = [\"Bolt\", \"BAN\"]").unwrap();
        assert_eq!(config.child_count, 3);
        assert_eq!(config.fly_out_radius, 130.0);
        assert_eq!(config.icons, vec![ChildIcon::Bolt, ChildIcon::Ban]);
        assert_eq!(config.layout().unwrap().child_count(), 3);
    }

    #[test]
    fn test_zero_children_rejected() {
        assert!(matches!(
            from_toml("child_count = 0"),
            Err(ConfigError::Layout(LayoutError::ChildCount { count: 0, .. }))
        ));
    }

    #[test]
    fn test_empty_icons_rejected() {
        assert!(matches!(
            from_toml("icons = []"),
            Err(ConfigError::Icons(IconError::Empty))
        ));
    }

    #[test]
    fn test_unknown_icon_rejected() {
        assert!(matches!(
            from_toml("icons = [\"rocket\"]"),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_spring_pairs_deserialize() {
        let config = from_toml("hub_spring = [300.0, 20.0]").unwrap();
        assert_eq!(config.hub_spring, SpringConfig::new(300.0, 20.0));
        assert_eq!(config.child_spring, CHILD_SPRING);
    }

    #[test]
    fn test_config_json_round_trip_uses_pairs() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["child_spring"], serde_json::json!([400.0, 28.0]));
        assert_eq!(json["icons"][0], "pencil");
    }
}
