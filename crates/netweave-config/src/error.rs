use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config directory not found")]
    ConfigDirNotFound,

    #[error(
        "no topology declaration found. Checked:\n\
        - current directory: topology.kdl, topology.local.kdl, .topology.kdl, .topology.local.kdl\n\
        - ./.netweave/ directory\n\
        - ~/.config/netweave/topology.kdl\n\
        or set NETWEAVE_CONFIG_PATH to a declaration file"
    )]
    TopologyFileNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
