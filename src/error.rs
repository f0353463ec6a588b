use thiserror::Error;

use crate::{system::Side, FLOAT};

pub type Result<T> = std::result::Result<T, RiemannError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiemannError {
    #[error("{side} state has a non-finite component {field} = {value}")]
    NonFinite {
        side: Side,
        field: &'static str,
        value: FLOAT,
    },

    #[error("{side} state is not admissible: {field} = {value} ({reason})")]
    Inadmissible {
        side: Side,
        field: &'static str,
        value: FLOAT,
        reason: &'static str,
    },

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: FLOAT,
        reason: &'static str,
    },

    #[error("eigenvector matrix of the {system} linearization is singular")]
    SingularEigenvectors { system: &'static str },

    #[error("{solver} solver is not available for {system}")]
    Unsupported {
        solver: String,
        system: &'static str,
    },

    #[error("{system} states have {expected} components, got {found}")]
    DimensionMismatch {
        system: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid problem description: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RiemannError {
    fn from(e: toml::de::Error) -> Self {
        RiemannError::Config(e.to_string())
    }
}
