pub mod dispatch;
pub mod reason;

mod actions;
mod best_effort;
mod cast;
mod digest;
mod fee;
mod guard;
mod nonces;
mod signers;
mod verifier;

#[cfg(test)]
mod tests;

pub use avocado_contracts::{AvocadoMultisigError, AvocadoMultisigEvent, IAvocadoMultisig};
pub use cast::CastOutcome;
pub use digest::{
    cast_authorized_digest, cast_digest, chain_agnostic_digest, chain_agnostic_domain,
    chain_agnostic_hash, chain_agnostic_hashes, domain,
};
pub use dispatch::AvocadoMultisigLogic;
pub use nonces::{occupy_avo_nonces_action, occupy_non_sequential_nonces_action};
pub use signers::{add_signers_action, remove_signers_action, set_required_signers_action};
pub use verifier::recover_signer;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolEvent};
use avocado_contracts::IAvoRegistry;
use tracing::trace;

use crate::{
    config::AvocadoConfig,
    error::Result,
    host::{CallInputs, Host},
    storage::{
        Slot, StorableValue,
        slots::{IMPLEMENTATION, INDEX, INITIALIZED, OWNER, REQUIRED_SIGNERS, TRANSIENT_CAST_GUARD},
    },
};

use IAvocadoMultisig::Action;

/// One account's view of the multisig logic, bound to the executing host frame.
///
/// All state lives in the host's storage under `address`; this type only carries the
/// logic version's immutable [`AvocadoConfig`].
pub struct AvocadoMultisig<'a> {
    address: Address,
    host: &'a mut dyn Host,
    config: &'a AvocadoConfig,
}

impl<'a> AvocadoMultisig<'a> {
    pub fn new(address: Address, host: &'a mut dyn Host, config: &'a AvocadoConfig) -> Self {
        Self {
            address,
            host,
            config,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &AvocadoConfig {
        self.config
    }

    pub(crate) fn read<T: StorableValue>(&mut self, slot: Slot<T>) -> Result<T> {
        slot.read(self.host, self.address)
    }

    pub(crate) fn write<T: StorableValue>(&mut self, slot: Slot<T>, value: T) -> Result<()> {
        slot.write(self.host, self.address, value)
    }

    pub(crate) fn emit<E: SolEvent>(&mut self, event: E) -> Result<()> {
        self.host.emit_event(self.address, event.encode_log_data())
    }

    /// Static-calls `target` and decodes its return value. `None` if the call failed or returned
    /// malformed data.
    pub(crate) fn static_query<C: SolCall>(
        &mut self,
        target: Address,
        call: &C,
        gas_limit: u64,
    ) -> Result<Option<C::Return>> {
        let outcome = self.host.call(CallInputs::static_call(
            self.address,
            target,
            call.abi_encode().into(),
            gas_limit,
        ))?;
        if !outcome.success {
            return Ok(None);
        }
        Ok(C::abi_decode_returns(&outcome.output).ok())
    }

    pub fn owner(&mut self) -> Result<Address> {
        self.read(OWNER)
    }

    pub fn index(&mut self) -> Result<u32> {
        self.read(INDEX)
    }

    pub fn implementation(&mut self) -> Result<Address> {
        self.read(IMPLEMENTATION)
    }

    pub fn required_signers(&mut self) -> Result<u8> {
        self.read(REQUIRED_SIGNERS)
    }

    /// Whether a cast of this account is currently executing.
    pub(crate) fn is_cast_active(&mut self) -> Result<bool> {
        Ok(!self.host.tload(self.address, TRANSIENT_CAST_GUARD)?.is_zero())
    }

    /// Self-authorized functions are only reachable through an action of a verified cast.
    pub(crate) fn check_self(&mut self, sender: Address) -> Result<()> {
        if sender != self.address || !self.is_cast_active()? {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        Ok(())
    }

    pub(crate) fn is_valid_forwarder(&mut self, sender: Address) -> Result<bool> {
        let gas = self.host.gas_left();
        let query = IAvoRegistry::isValidForwarderCall {
            avoForwarder: sender,
        };
        Ok(self
            .static_query(self.config.registry, &query, gas)?
            .unwrap_or(false))
    }

    /// Sets up a freshly deployed account. Only the configured factory may call it, once.
    pub fn initialize(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::initializeCall,
    ) -> Result<()> {
        if sender != self.config.factory {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        if self.read(INITIALIZED)? || call.owner.is_zero() {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        trace!(account = %self.address, owner = %call.owner, index = call.index, "initializing account");
        self.write(OWNER, call.owner)?;
        self.write(INDEX, call.index)?;
        self.write(INITIALIZED, true)?;
        self.write(REQUIRED_SIGNERS, 1)?;
        self.emit(IAvocadoMultisig::Initialized {
            owner: call.owner,
            index: call.index,
        })?;

        if !call.signers.is_empty() {
            self.add_signers_internal(&call.signers, call.requiredSigners)?;
        } else if call.requiredSigners > 1 {
            return Err(AvocadoMultisigError::invalid_params().into());
        }
        Ok(())
    }

    /// Points the account's proxy at another registered logic version. Storage is preserved.
    pub fn upgrade_to(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::upgradeToCall,
    ) -> Result<()> {
        self.check_self(sender)?;

        let gas = self.host.gas_left();
        let query = IAvoRegistry::isValidImplementationCall {
            avoImpl: call.newImplementation,
        };
        if !self
            .static_query(self.config.registry, &query, gas)?
            .unwrap_or(false)
        {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        trace!(account = %self.address, implementation = %call.newImplementation, "upgrading account");
        self.write(IMPLEMENTATION, call.newImplementation)?;
        self.emit(IAvocadoMultisig::Upgraded {
            newImplementation: call.newImplementation,
        })
    }
}

/// Builds a self-call action upgrading `account` to `implementation`.
pub fn upgrade_to_action(account: Address, implementation: Address) -> Action {
    self_action(
        account,
        IAvocadoMultisig::upgradeToCall {
            newImplementation: implementation,
        }
        .abi_encode()
        .into(),
    )
}

pub(crate) fn self_action(account: Address, data: Bytes) -> Action {
    Action {
        target: account,
        data,
        value: U256::ZERO,
        operation: U256::from(Action::CALL),
    }
}
