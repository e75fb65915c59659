use sim::SimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(&'static str),
    #[error("simulation backend error: {0}")]
    Sim(#[from] SimError),
}
