use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read thresholds file {path}: {source}")]
    ThresholdsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse thresholds file: {0}")]
    ThresholdsFileParse(#[from] serde_yaml::Error),

    #[error("invalid analysis thresholds: {0}")]
    Validation(String),
}
