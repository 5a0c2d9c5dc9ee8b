use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("Host error: {0}")]
    Host(String),

    #[error("Item name unavailable: {0}")]
    ItemName(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
