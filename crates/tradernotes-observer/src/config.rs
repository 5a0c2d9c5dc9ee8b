use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tradernotes_models::TraderNotesConfig;

use crate::error::ObserverError;

/// Parse a TOML configuration file.
pub fn read_config(path: &Path) -> Result<TraderNotesConfig, ObserverError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

pub fn write_config(path: &Path, config: &TraderNotesConfig) -> Result<(), ObserverError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Load the configuration, never failing.
///
/// A missing file is created with the defaults so players can edit it.
/// A file that cannot be read or parsed is left untouched and the defaults are used.
pub fn load_or_default(path: &Path) -> TraderNotesConfig {
    match read_config(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded configuration");
            config
        }
        Err(ObserverError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            let config = TraderNotesConfig::default();
            if let Err(e) = write_config(path, &config) {
                tracing::warn!(path = %path.display(), error = %e, "Could not write default configuration");
            } else {
                tracing::info!(path = %path.display(), "Wrote default configuration");
            }
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Invalid configuration, using defaults");
            TraderNotesConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/tradernotes.toml");

        let config = load_or_default(&path);
        assert_eq!(config, TraderNotesConfig::default());
        assert!(path.exists());
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn corrupt_file_falls_back_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradernotes.toml");
        fs::write(&path, "[overlay\nicon = ").unwrap();

        let config = load_or_default(&path);
        assert_eq!(config, TraderNotesConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[overlay\nicon = ");
    }

    #[test]
    fn wrong_types_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradernotes.toml");
        fs::write(&path, "[observer]\nlive_update = \"yes please\"\n").unwrap();

        assert!(matches!(read_config(&path), Err(ObserverError::ConfigParse(_))));
        assert!(!load_or_default(&path).observer.live_update);
    }

    #[test]
    fn reads_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradernotes.toml");
        fs::write(
            &path,
            "[overlay]\nicon_size = 40\n\n[colors]\nprice = \"#ffffff\"\n",
        )
        .unwrap();

        let config = load_or_default(&path);
        assert_eq!(config.overlay.icon_size, 40);
        assert_eq!(config.colors.price, "#ffffff");
        assert_eq!(config.colors.funds, "#deffa1");
    }
}
