//! Settings file for the CLI.
//!
//! ```toml
//! strict = true
//!
//! [defaults]
//! summons = ["Bahamut", "Lucifer"]
//! repeat = 3
//! ```

use std::{fs, io, path::Path, path::PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::{CompileOptions, RunDefaults};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing settings from '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("[defaults] repeat must be at least 1")]
    ZeroRepeat,
}

/// Compiler and run settings. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reject unrecognized top-level lines instead of discarding them.
    pub strict: bool,
    /// Summon and repeat fallbacks for raids that do not set their own.
    pub defaults: RunDefaults,
}

impl Settings {
    /// Parse settings from TOML text. Summon names are lowercased to match
    /// the normalized script text.
    ///
    /// # Errors
    /// Returns an error on invalid TOML or a zero default repeat count.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text, path)?;
        info!(
            "settings loaded from '{}' ({} default summon(s), repeat {})",
            path.display(),
            settings.defaults.summons.len(),
            settings.defaults.repeat
        );
        Ok(settings)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions { strict: self.strict }
    }

    fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if settings.defaults.repeat == 0 {
            return Err(SettingsError::ZeroRepeat);
        }
        for summon in &mut settings.defaults.summons {
            *summon = summon.trim().to_lowercase();
        }
        settings.defaults.summons.retain(|s| !s.is_empty());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("").expect("empty settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.defaults.repeat, 1);
        assert!(!settings.compile_options().strict);
    }

    #[test]
    fn full_file() {
        let settings = Settings::from_toml_str(
            "strict = true\n[defaults]\nsummons = [\"Bahamut\", \" Lucifer \", \"\"]\nrepeat = 4\n",
        )
        .expect("settings");
        assert!(settings.compile_options().strict);
        assert_eq!(settings.defaults.summons, vec!["bahamut", "lucifer"]);
        assert_eq!(settings.defaults.repeat, 4);
    }

    #[test]
    fn partial_defaults_table_keeps_repeat_one() {
        let settings = Settings::from_toml_str("[defaults]\nsummons = [\"kaguya\"]\n").expect("settings");
        assert_eq!(settings.defaults.repeat, 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Settings::from_toml_str("[defaults]\nrepeat = 0\n"),
            Err(SettingsError::ZeroRepeat)
        ));
        let err = Settings::from_toml_str("strict = \"yes\"").expect_err("type error");
        assert!(err.to_string().starts_with("parsing settings from '<inline>'"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
