use std::path::Path;

use serde::Deserialize;

use crate::cli_error::CliError;

/// Optional `.egg.toml` defaults (§2 "Configuration"): out of spec.md's core
/// scope, but the CLI still gets a real config layer instead of hand-rolled
/// argv parsing. Every field has a default, so a missing or empty file is
/// equivalent to one that sets nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EggConfig {
    /// Mirrors `--verbose`; a CLI flag always wins over this.
    pub verbose: bool,
    /// Mirrors `--no-color`; a CLI flag always wins over this.
    pub no_color: bool,
}

impl EggConfig {
    /// Loads `path`, or `./.egg.toml` if `path` is `None` and that file
    /// exists, or the all-defaults config if neither is present.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let resolved = match path {
            Some(path) => path,
            None => Path::new(".egg.toml"),
        };
        if path.is_none() && !resolved.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(resolved)
            .map_err(|source| CliError::Io { path: resolved.to_path_buf(), source })?;
        toml::from_str(&text).map_err(|source| CliError::Config { path: resolved.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_file_yields_defaults() {
        let config = EggConfig::load(None).unwrap();
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn explicit_missing_path_is_an_io_error() {
        let err = EggConfig::load(Some(Path::new("/no/such/egg.toml")));
        assert!(matches!(err, Err(CliError::Io { .. })));
    }

    #[test]
    fn parses_known_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("egg.toml");
        std::fs::write(&path, "verbose = true\nno_color = true\n").unwrap();
        let config = EggConfig::load(Some(&path)).unwrap();
        assert!(config.verbose);
        assert!(config.no_color);
    }
}
