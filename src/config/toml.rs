//! TOML configuration file parsing

use super::RandomsConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<RandomsConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<RandomsConfig> {
    let config: RandomsConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorKind;
    use std::io::Write;

    #[test]
    fn test_parse_toml_basic() {
        let toml = r#"
generator = "xoshiro"
seed = 42
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.generator, GeneratorKind::Xoshiro);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_parse_toml_empty_uses_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config, RandomsConfig::default());
    }

    #[test]
    fn test_parse_toml_rejects_unknown() {
        assert!(parse_toml_string(r#"generator = "mersenne""#).is_err());
        assert!(parse_toml_string("seeds = 1").is_err());
        assert!(parse_toml_string("seed = -1").is_err());
    }

    #[test]
    fn test_parse_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generator = \"lcg\"").unwrap();
        writeln!(file, "seed = 7").unwrap();

        let config = parse_toml_file(file.path()).unwrap();
        assert_eq!(config.generator, GeneratorKind::Lcg);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_written_config_parses_back() {
        let configs = [
            RandomsConfig::default(),
            RandomsConfig {
                generator: GeneratorKind::Xoshiro,
                seed: Some(42),
            },
        ];
        for config in &configs {
            let written = ::toml::to_string(config).unwrap();
            assert_eq!(&parse_toml_string(&written).unwrap(), config, "written:\n{}", written);
        }

        let written = ::toml::to_string(&configs[1]).unwrap();
        assert!(written.contains("generator = \"xoshiro\""), "written:\n{}", written);
    }

    #[test]
    fn test_parse_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_toml_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
