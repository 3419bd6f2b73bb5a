use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("Storage service error: {message}")]
    Storage { message: String },
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;
