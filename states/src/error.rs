use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State not registered: {type_name}")]
    StateNotFound { type_name: &'static str },
    #[error("Compute not registered: {type_name}")]
    ComputeNotFound { type_name: &'static str },
    #[error("Command not registered: {type_name}")]
    CommandNotFound { type_name: &'static str },
}

impl StateError {
    pub fn state_not_found<T>() -> Self {
        Self::StateNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn compute_not_found<T>() -> Self {
        Self::ComputeNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }
}
