use crate::domain::models::Settings;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Loads and persists the settings record as TOML. Loaded once at
/// startup; saved after every mutation.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// The default location, `~/.config/scribe/settings.toml`.
    pub fn from_home() -> Option<Self> {
        home::home_dir().map(|mut path| {
            path.push(".config");
            path.push("scribe");
            path.push("settings.toml");
            Self { path }
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// A missing or unreadable file yields the built-in defaults.
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            return Settings::default();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!(%err, path = %self.path.display(), "settings file is invalid, using defaults");
                    Settings::default()
                }
            },
            Err(err) => {
                tracing::warn!(%err, path = %self.path.display(), "could not read settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(settings).context("serializing settings")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PromptCommand;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::at(dir.path().join("settings.toml"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(&dir).load();
        assert_eq!(settings, Settings::default());
        assert!(!settings.commands.is_empty());
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut settings = Settings::default();
        settings.server_url = "http://10.0.0.5:11434".to_string();
        settings.commands.push(PromptCommand {
            name: "Mine".to_string(),
            prompt: "Do it.".to_string(),
            model: Some("mistral".to_string()),
            temperature: Some(0.7),
        });

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn optional_command_fields_survive_the_round_trip_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let settings = Settings::default();
        store.save(&settings).unwrap();

        let loaded = store.load();
        let first = &loaded.commands[0];
        assert_eq!(first.model, None);
        assert_eq!(first.temperature, None);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not [ valid { toml").unwrap();
        assert_eq!(store.load(), Settings::default());
    }
}
