use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtomError {
    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("failed to read declaration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    #[error("duplicate {kind} \"{name}\"")]
    Duplicate { kind: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, AtomError>;
