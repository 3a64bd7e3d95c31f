//! Configuration loading and root folder resolution
//!
//! Every Leadflow service resolves a single "root folder" that holds the
//! SQLite database and any service-local files. Resolution follows a fixed
//! priority order so deployments can override the location without code
//! changes:
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`LEADFLOW_ROOT_FOLDER`, then `LEADFLOW_ROOT`)
//! 3. TOML config file (`root_folder` key)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use std::path::PathBuf;

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "leadflow.db";

/// Resolves the root folder for a service using the 4-tier priority order.
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<String>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
        }
    }

    /// Supply a command-line override (takes priority over everything else)
    pub fn with_cli_arg(mut self, cli_arg: Option<String>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    /// Resolve the root folder. Never fails: the compiled default is always
    /// available, so a missing config file degrades gracefully.
    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            tracing::info!("{}: root folder from command line: {}", self.module_name, path);
            return PathBuf::from(path);
        }

        // Priority 2: Environment variables
        for var in ["LEADFLOW_ROOT_FOLDER", "LEADFLOW_ROOT"] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    tracing::info!("{}: root folder from {}: {}", self.module_name, var, path);
                    return PathBuf::from(path);
                }
            }
        }

        // Priority 3: TOML config file
        if let Ok(config_path) = locate_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                    if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                        tracing::info!(
                            "{}: root folder from {}: {}",
                            self.module_name,
                            config_path.display(),
                            root_folder
                        );
                        return PathBuf::from(root_folder);
                    }
                }
            }
        }

        // Priority 4: OS-dependent compiled default
        default_root_folder()
    }
}

/// Ensures the resolved root folder exists and derives file paths inside it.
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn root_folder(&self) -> &PathBuf {
        &self.root_folder
    }

    /// Path of the shared SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }
}

/// Locate the platform configuration file, if one exists
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/leadflow/config.toml first, then /etc/leadflow/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("leadflow").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/leadflow/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("leadflow").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/leadflow
        dirs::data_local_dir()
            .map(|d| d.join("leadflow"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/leadflow"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/leadflow
        dirs::data_dir()
            .map(|d| d.join("leadflow"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/leadflow"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\leadflow
        dirs::data_local_dir()
            .map(|d| d.join("leadflow"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\leadflow"))
    } else {
        PathBuf::from("./leadflow_data")
    }
}
