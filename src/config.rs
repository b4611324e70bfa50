use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

pub struct ScopeConfig {
    /// Row limit used when a fetch does not specify one
    pub default_row_limit: u64,

    /// Directory export files land in when no output path is given
    pub export_dir: String,
}

const EMPTY_CONFIG: &str = r#"### sqlscope configuration file

### row limit applied when `rows` is called without --limit
# default_row_limit = 200

### directory for exported artifacts when -o is omitted
# export_dir = "."
"#;

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            default_row_limit: 200,
            export_dir: ".".to_string(),
        }
    }
}

impl ScopeConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<ScopeConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.sqlscope.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                let p = format!("{}/.sqlscope.toml", home_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file {}: {}", p.as_str(), e))?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of SQLSCOPE)
        // E.g., `SQLSCOPE_DEFAULT_ROW_LIMIT=50 sqlscope ...`
        builder = builder.add_source(config::Environment::with_prefix("SQLSCOPE"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let defaults = ScopeConfig::default();

        let default_row_limit = config
            .get("default_row_limit")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.default_row_limit);

        let export_dir = config
            .get("export_dir")
            .cloned()
            .unwrap_or(defaults.export_dir);

        Ok(ScopeConfig {
            default_row_limit,
            export_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScopeConfig::default();
        assert_eq!(config.default_row_limit, 200);
        assert_eq!(config.export_dir, ".");
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scope.toml");
        std::fs::write(
            &path,
            "default_row_limit = \"25\"\nexport_dir = \"/tmp/exports\"\n",
        )
        .unwrap();

        let config = ScopeConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.default_row_limit, 25);
        assert_eq!(config.export_dir, "/tmp/exports");
    }

    #[test]
    fn test_missing_explicit_file_is_created_with_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.toml");
        let config = ScopeConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.default_row_limit, 200);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("sqlscope configuration file"));
    }
}
