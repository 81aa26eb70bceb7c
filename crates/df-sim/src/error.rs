use df_core::DfError;
use df_queue::IntakeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("request rejected: {0}")]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Core(#[from] DfError),
}

pub type SimResult<T> = Result<T, SimError>;
