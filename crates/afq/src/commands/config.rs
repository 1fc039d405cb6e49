//! Config command implementation.
//!
//! View and initialize configuration settings.
//! Config file is located at ~/.config/afq/config.toml.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use aphfilter::ResourceSchema;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# afq - filter compiler configuration

# Config schema version (do not modify)
version = 1

# Default backend: "postgres" or "aql"
# dialect = "postgres"

# One table per exposed resource. `fields` is the filter allow-list;
# `columns` maps a field to a storage column when the names differ.
#
# [resources.gene]
# fields = ["name", "organism", "created_at"]
#
# [resources.gene.columns]
# name = "gene_name"
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default dialect name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,

    /// Filterable resources, by name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSchema>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            dialect: None,
            resources: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Looks up a resource by name.
    pub fn resource(&self, name: &str) -> Result<&ResourceSchema> {
        self.resources.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.resources.keys().map(String::as_str).collect();
            let hint = if known.is_empty() {
                "no resources are configured".to_string()
            } else {
                format!("known resources: {}", known.join(", "))
            };
            CommandError::Config(format!("unknown resource '{}' ({})", name, hint))
        })
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/afq/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("AFQ_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("afq"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("afq"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("AFQ_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk, or the defaults if no file exists.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    tracing::debug!(
        path = %path.display(),
        resources = config.resources.len(),
        "loaded config"
    );
    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema; later versions add their steps here.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref dialect) = config.dialect {
                println!("  dialect: {}", dialect);
            }

            for (name, schema) in &config.resources {
                println!("\n[resources.{}]", name);
                println!("  fields: {}", schema.fields.join(", "));
                for (field, column) in schema.columns.iter() {
                    println!("  {} -> {}", field, column);
                }
            }
        } else {
            println!("(No config file exists. Run 'afq config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let created = !path.exists();

    if created {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CommandError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;
    }

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "created": created,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created default config at: {}", path.display());
        } else {
            println!("Config already exists at: {}", path.display());
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Points AFQ_CONFIG at `path` for the duration of `f`.
    fn with_config_env<T>(path: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original = env::var("AFQ_CONFIG").ok();
        env::set_var("AFQ_CONFIG", path);
        let result = f();
        match original {
            Some(val) => env::set_var("AFQ_CONFIG", val),
            None => env::remove_var("AFQ_CONFIG"),
        }
        result
    }

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.dialect.is_none());
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_config_with_resources() {
        let config: Config = toml::from_str(
            r#"
dialect = "aql"

[resources.gene]
fields = ["name", "organism"]

[resources.gene.columns]
name = "gene_name"

[resources.strain]
fields = ["label"]
"#,
        )
        .unwrap();

        assert_eq!(config.dialect.as_deref(), Some("aql"));
        let gene = config.resource("gene").unwrap();
        assert_eq!(gene.column_map().column("name"), Some("gene_name"));
        assert!(config.resource("strain").unwrap().is_allowed("label"));
    }

    #[test]
    fn test_unknown_resource_lists_known() {
        let mut config = Config::default();
        let err = config.resource("gene").unwrap_err();
        assert!(err.to_string().contains("no resources are configured"));

        config
            .resources
            .insert("strain".to_string(), ResourceSchema::new().field("label"));
        let err = config.resource("gene").unwrap_err();
        assert!(err.to_string().contains("known resources: strain"));
    }

    #[test]
    fn test_config_deserialization_with_future_version() {
        let config: Config = toml::from_str("version = 999\ndialect = \"postgres\"").unwrap();
        assert_eq!(config.version, 999);
        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.dialect.as_deref(), Some("postgres"));
    }

    #[test]
    #[serial]
    fn test_load_config_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let config = with_config_env(&path, load_config).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.resources.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_config_from_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "dialect = \"aql\"\n[resources.gene]\nfields = [\"name\"]\n",
        )
        .unwrap();

        let config = with_config_env(&path, load_config).unwrap();
        assert_eq!(config.dialect.as_deref(), Some("aql"));
        assert!(config.resource("gene").unwrap().is_allowed("name"));
    }

    #[test]
    #[serial]
    fn test_load_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "resources = [not toml").unwrap();

        let err = with_config_env(&path, load_config).unwrap_err();
        assert!(matches!(err, CommandError::Config(ref msg) if msg.starts_with("Failed to parse config")));
    }

    #[test]
    #[serial]
    fn test_init_writes_default_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let ctx = CommandContext {
            json_output: true,
            use_colors: false,
            quiet: true,
        };

        with_config_env(&path, || execute_init(&ctx)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs::write(&path, "dialect = \"aql\"\n").unwrap();
        with_config_env(&path, || execute_init(&ctx)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "dialect = \"aql\"\n");
    }

    #[test]
    #[serial]
    fn test_config_dir_follows_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let dir = with_config_env(&path, get_config_dir).unwrap();
        assert_eq!(dir, temp_dir.path());
    }
}
