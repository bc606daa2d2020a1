use alloy_primitives::Bytes;
use alloy_sol_types::SolInterface;
use avocado_contracts::{AvoFactoryError, AvoForwarderError, AvocadoMultisigError};

/// Result type used throughout the account implementation.
pub type Result<T> = std::result::Result<T, AvocadoError>;

/// Errors raised while executing account, proxy, factory or forwarder code.
///
/// Everything except [`AvocadoError::Fatal`] is a regular revert: it rolls back the current call
/// frame and surfaces to the caller as revert data (see [`AvocadoError::revert_data`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvocadoError {
    #[error("account reverted: {0:?}")]
    Multisig(AvocadoMultisigError),

    #[error("factory reverted: {0:?}")]
    Factory(AvoFactoryError),

    #[error("forwarder reverted: {0:?}")]
    Forwarder(AvoForwarderError),

    /// Revert data bubbled up unchanged from a callee.
    #[error("execution reverted: {0}")]
    Revert(Bytes),

    #[error("out of gas")]
    OutOfGas,

    #[error("state modification attempted in a static context")]
    StaticCallViolation,

    #[error("unknown function selector {0:?}")]
    UnknownSelector([u8; 4]),

    #[error("invalid abi encoding: {0}")]
    Abi(String),

    /// Host-level failure that must never be turned into revert data.
    #[error("fatal: {0}")]
    Fatal(String),
}

impl AvocadoError {
    /// ABI-encoded revert data reported to the caller of the failing frame.
    pub fn revert_data(&self) -> Bytes {
        match self {
            Self::Multisig(err) => err.abi_encode().into(),
            Self::Factory(err) => err.abi_encode().into(),
            Self::Forwarder(err) => err.abi_encode().into(),
            Self::Revert(data) => data.clone(),
            Self::OutOfGas
            | Self::StaticCallViolation
            | Self::UnknownSelector(_)
            | Self::Abi(_)
            | Self::Fatal(_) => Bytes::new(),
        }
    }

    /// Returns the account error if this is one.
    pub fn as_multisig(&self) -> Option<&AvocadoMultisigError> {
        match self {
            Self::Multisig(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

impl From<AvocadoMultisigError> for AvocadoError {
    fn from(value: AvocadoMultisigError) -> Self {
        Self::Multisig(value)
    }
}

impl From<AvoFactoryError> for AvocadoError {
    fn from(value: AvoFactoryError) -> Self {
        Self::Factory(value)
    }
}

impl From<AvoForwarderError> for AvocadoError {
    fn from(value: AvoForwarderError) -> Self {
        Self::Forwarder(value)
    }
}

impl From<alloy_sol_types::Error> for AvocadoError {
    fn from(value: alloy_sol_types::Error) -> Self {
        Self::Abi(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_data_round_trips_account_errors() -> eyre::Result<()> {
        let err: AvocadoError = AvocadoMultisigError::invalid_timing().into();
        let data = err.revert_data();

        let decoded = AvocadoMultisigError::abi_decode(&data)?;
        assert_eq!(decoded, AvocadoMultisigError::invalid_timing());
        assert_eq!(err.as_multisig(), Some(&decoded));
        Ok(())
    }

    #[test]
    fn test_out_of_gas_has_empty_revert_data() {
        assert!(AvocadoError::OutOfGas.revert_data().is_empty());
        assert!(!AvocadoError::OutOfGas.is_fatal());
        assert!(AvocadoError::Fatal("boom".into()).is_fatal());
    }
}
