pub mod error;

pub use error::*;

use std::path::PathBuf;

/// Netweave's per-user config directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("netweave");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Find the topology declaration for the current project
///
/// Search order:
/// 1. NETWEAVE_CONFIG_PATH environment variable (direct path)
/// 2. Current directory: topology.local.kdl, .topology.local.kdl,
///    topology.kdl, .topology.kdl
/// 3. ./.netweave/ directory, same candidates
/// 4. ~/.config/netweave/topology.kdl (global)
pub fn find_topology_file() -> Result<PathBuf> {
    // 1. Direct path via environment variable
    if let Ok(config_path) = std::env::var("NETWEAVE_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;
    let candidates = [
        "topology.local.kdl",
        ".topology.local.kdl",
        "topology.kdl",
        ".topology.kdl",
    ];

    // 2. Current directory
    for filename in &candidates {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. ./.netweave/ directory
    let netweave_dir = current_dir.join(".netweave");
    if netweave_dir.is_dir() {
        for filename in &candidates {
            let path = netweave_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    // 4. Global declaration (~/.config/netweave/topology.kdl)
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("netweave").join("topology.kdl");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::TopologyFileNotFound)
}
