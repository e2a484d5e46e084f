use thiserror::Error;

/// Errores de la aplicación. Los mensajes de configuración, generación y JIRA
/// ya vienen redactados para mostrarse al usuario tal cual.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Jira(String),
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error al escribir CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
