//! Program installed at every account address.

use alloy_primitives::Bytes;
use tracing::trace;

use crate::{
    error::{AvocadoError, Result},
    host::{CallInputs, Frame, Host, Program},
    storage::slots::IMPLEMENTATION,
};

/// Forwards every call to the logic version stored in slot 0.
///
/// The proxy holds no logic of its own. Upgrading an account rewrites slot 0; every other slot
/// stays untouched, so the new version sees the same state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvocadoProxy;

impl Program for AvocadoProxy {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        let implementation = IMPLEMENTATION.read(host, frame.address)?;
        trace!(account = %frame.address, %implementation, "proxying call");

        let gas = host.gas_left();
        let outcome = host.call(CallInputs::delegate_call(
            frame.address,
            implementation,
            frame.input.clone(),
            gas,
        ))?;

        if outcome.success {
            Ok(outcome.output)
        } else if outcome.is_out_of_gas() {
            Err(AvocadoError::OutOfGas)
        } else {
            Err(AvocadoError::Revert(outcome.output))
        }
    }
}
