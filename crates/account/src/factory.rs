//! Deterministic account deployment.

use std::rc::Rc;

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::{SolCall, SolEvent, SolInterface, SolValue};
use avocado_contracts::{
    AvoFactoryError, IAvoFactory, IAvoFactory::IAvoFactoryCalls, IAvocadoMultisig,
};
use tracing::debug;

use crate::{
    dispatch::{dispatch_call, input_cost, mutate, view},
    error::{AvocadoError, Result},
    host::{CallInputs, Frame, Host, Program},
    proxy::AvocadoProxy,
    storage::slots::IMPLEMENTATION,
};

/// Code hash every account address is derived from.
pub fn proxy_code_hash() -> B256 {
    keccak256(b"AvocadoProxy")
}

/// Address of the account of `owner` at `index` deployed by `factory`.
pub fn compute_avocado_address(factory: Address, owner: Address, index: u32) -> Address {
    let salt = keccak256((owner, U256::from(index)).abi_encode());
    factory.create2(salt, proxy_code_hash())
}

/// Deploys account proxies pointing at `current_implementation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvoFactory {
    current_implementation: Address,
}

impl AvoFactory {
    pub fn new(current_implementation: Address) -> Self {
        Self {
            current_implementation,
        }
    }

    pub fn current_implementation(&self) -> Address {
        self.current_implementation
    }

    fn is_avocado(&self, host: &mut dyn Host, account: Address) -> Result<bool> {
        Ok(host.is_contract(account)? && !IMPLEMENTATION.read(host, account)?.is_zero())
    }

    /// Installs the proxy at the deterministic address and initializes it as the factory.
    pub fn deploy(
        &self,
        host: &mut dyn Host,
        factory: Address,
        owner: Address,
        index: u32,
        signers: Vec<Address>,
        required_signers: u8,
    ) -> Result<Address> {
        if owner.is_zero() {
            return Err(AvoFactoryError::invalid_params().into());
        }
        let account = compute_avocado_address(factory, owner, index);
        if host.is_contract(account)? {
            return Err(AvoFactoryError::already_deployed(account).into());
        }

        host.set_code(account, Rc::new(AvocadoProxy))?;
        // Constructor of the proxy: point it at the current logic version.
        IMPLEMENTATION.write(host, account, self.current_implementation)?;

        let initialize = IAvocadoMultisig::initializeCall {
            owner,
            index,
            signers,
            requiredSigners: required_signers,
        };
        let gas = host.gas_left();
        let outcome = host.call(CallInputs::call(
            factory,
            account,
            U256::ZERO,
            initialize.abi_encode().into(),
            gas,
        ))?;
        if !outcome.success {
            debug!(%owner, index, %account, "account initialization reverted");
            return Err(AvocadoError::Revert(outcome.output));
        }

        host.emit_event(
            factory,
            IAvoFactory::AvocadoDeployed {
                owner,
                index,
                avocado: account,
            }
            .encode_log_data(),
        )?;
        debug!(%owner, index, %account, "account deployed");
        Ok(account)
    }
}

impl Program for AvoFactory {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        host.deduct_gas(input_cost(frame.input.len()))?;
        let factory = frame.address;

        dispatch_call(&frame.input, IAvoFactoryCalls::abi_decode, |call| match call {
            IAvoFactoryCalls::computeAvocado(call) => view(call, |c| {
                Ok(compute_avocado_address(factory, c.owner, c.index))
            }),
            IAvoFactoryCalls::currentImplementation(call) => {
                view(call, |_| Ok(self.current_implementation))
            }
            IAvoFactoryCalls::isAvocado(call) => view(call, |c| self.is_avocado(host, c.avocado)),
            IAvoFactoryCalls::deploy(call) => mutate(call, frame.caller, |_, c| {
                self.deploy(host, factory, c.owner, c.index, Vec::new(), 1)
            }),
            IAvoFactoryCalls::deployWithSigners(call) => mutate(call, frame.caller, |_, c| {
                self.deploy(host, factory, c.owner, c.index, c.signers, c.requiredSigners)
            }),
        })
    }
}
