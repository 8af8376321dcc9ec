use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Ploidy must be at least 1, but {value} was configured for {target}")]
    InvalidPloidy { target: String, value: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
