//! Trusted relay in front of every account.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolEvent, SolInterface, SolValue};
use avocado_contracts::{
    AvoForwarderError, IAvoFactory, IAvoForwarder, IAvoForwarder::IAvoForwarderCalls,
    IAvocadoMultisig,
};
use tracing::{debug, trace};

use crate::{
    constants::DEAD_ADDRESS,
    dispatch::{dispatch_call, input_cost, mutate, view},
    error::{AvocadoError, Result},
    factory::compute_avocado_address,
    host::{CallInputs, Frame, Host, Program},
};

/// Relays signed casts to accounts, deploying them through the factory on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvoForwarder {
    factory: Address,
}

/// Which account entry point a relayed call ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relay {
    Cast,
    SimulateCast,
    CastChainAgnostic,
    SimulateCastChainAgnostic,
}

impl Relay {
    fn selector(self) -> [u8; 4] {
        match self {
            Self::Cast => IAvocadoMultisig::castCall::SELECTOR,
            Self::SimulateCast => IAvocadoMultisig::simulateCastCall::SELECTOR,
            Self::CastChainAgnostic => IAvocadoMultisig::castChainAgnosticCall::SELECTOR,
            Self::SimulateCastChainAgnostic => {
                IAvocadoMultisig::simulateCastChainAgnosticCall::SELECTOR
            }
        }
    }
}

/// Account calldata for `selector` with already ABI-encoded parameters.
fn account_calldata(selector: [u8; 4], params: Vec<u8>) -> Bytes {
    let mut input = Vec::with_capacity(4 + params.len());
    input.extend_from_slice(&selector);
    input.extend_from_slice(&params);
    input.into()
}

impl AvoForwarder {
    pub fn new(factory: Address) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    pub fn compute_avocado(&self, owner: Address, index: u32) -> Address {
        compute_avocado_address(self.factory, owner, index)
    }

    fn deployed_avocado(
        &self,
        host: &mut dyn Host,
        forwarder: Address,
        owner: Address,
        index: u32,
    ) -> Result<Address> {
        let account = self.compute_avocado(owner, index);
        if host.is_contract(account)? {
            return Ok(account);
        }

        trace!(%owner, index, %account, "deploying account before relaying");
        let gas = host.gas_left();
        let outcome = host.call(CallInputs::call(
            forwarder,
            self.factory,
            U256::ZERO,
            IAvoFactory::deployCall { owner, index }.abi_encode().into(),
            gas,
        ))?;
        if !outcome.success {
            return Err(AvocadoError::Revert(outcome.output));
        }
        Ok(account)
    }

    /// Relays a cast and reports its outcome. Reverts of the account bubble up unchanged.
    #[allow(clippy::too_many_arguments)]
    fn relay(
        &self,
        host: &mut dyn Host,
        frame: &Frame,
        owner: Address,
        index: u32,
        relay: Relay,
        params: Vec<u8>,
        source: Address,
        metadata: Bytes,
    ) -> Result<(bool, String)> {
        let account = self.deployed_avocado(host, frame.address, owner, index)?;

        let gas = host.gas_left();
        let outcome = host.call(CallInputs::call(
            frame.address,
            account,
            frame.value,
            account_calldata(relay.selector(), params),
            gas,
        ))?;
        if !outcome.success {
            return Err(AvocadoError::Revert(outcome.output));
        }

        // Every relayed entry point returns `(bool success, string revertReason)`.
        let ret = IAvocadoMultisig::castCall::abi_decode_returns(&outcome.output)?;
        let event = if ret.success {
            IAvoForwarder::Executed {
                avocadoOwner: owner,
                index,
                avocadoAddress: account,
                source,
                metadata,
            }
            .encode_log_data()
        } else {
            debug!(%owner, index, %account, reason = %ret.revertReason, ?relay, "relayed cast failed");
            IAvoForwarder::ExecuteFailed {
                avocadoOwner: owner,
                index,
                avocadoAddress: account,
                source,
                metadata,
                reason: ret.revertReason.clone(),
            }
            .encode_log_data()
        };
        host.emit_event(frame.address, event)?;

        Ok((ret.success, ret.revertReason))
    }

    /// Simulations are only relayed for estimation transactions sent from the dead address.
    fn check_simulation(host: &dyn Host) -> Result<()> {
        if host.tx_origin() != DEAD_ADDRESS {
            return Err(AvoForwarderError::unauthorized().into());
        }
        Ok(())
    }

    /// Static-calls a verification view of a deployed account.
    fn verify(
        &self,
        host: &mut dyn Host,
        frame: &Frame,
        owner: Address,
        index: u32,
        input: Bytes,
    ) -> Result<bool> {
        let account = self.compute_avocado(owner, index);
        if !host.is_contract(account)? {
            return Err(AvoForwarderError::invalid_params().into());
        }

        let gas = host.gas_left();
        let outcome = host.call(CallInputs::static_call(frame.address, account, input, gas))?;
        if !outcome.success {
            return Err(AvocadoError::Revert(outcome.output));
        }
        Ok(IAvocadoMultisig::verifyCall::abi_decode_returns(&outcome.output)?)
    }
}

impl Program for AvoForwarder {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        host.deduct_gas(input_cost(frame.input.len()))?;

        dispatch_call(&frame.input, IAvoForwarderCalls::abi_decode, |call| match call {
            IAvoForwarderCalls::computeAvocado(call) => {
                view(call, |c| Ok(self.compute_avocado(c.owner, c.index)))
            }
            IAvoForwarderCalls::execute(call) => mutate(call, frame.caller, |_, c| {
                let (source, metadata) = (c.params.source, c.params.metadata.clone());
                let params = (c.params, c.forwardParams, c.signaturesParams).abi_encode_params();
                let (success, revertReason) = self.relay(
                    host, frame, c.owner, c.index, Relay::Cast, params, source, metadata,
                )?;
                Ok(IAvoForwarder::executeReturn {
                    success,
                    revertReason,
                })
            }),
            IAvoForwarderCalls::simulate(call) => mutate(call, frame.caller, |_, c| {
                Self::check_simulation(host)?;
                let (source, metadata) = (c.params.source, c.params.metadata.clone());
                let params = (c.params, c.forwardParams, c.signaturesParams).abi_encode_params();
                let (success, revertReason) = self.relay(
                    host, frame, c.owner, c.index, Relay::SimulateCast, params, source, metadata,
                )?;
                Ok(IAvoForwarder::simulateReturn {
                    success,
                    revertReason,
                })
            }),
            IAvoForwarderCalls::verify(call) => view(call, |c| {
                let params = (c.params, c.forwardParams, c.signaturesParams).abi_encode_params();
                let input = account_calldata(IAvocadoMultisig::verifyCall::SELECTOR, params);
                self.verify(host, frame, c.owner, c.index, input)
            }),
            IAvoForwarderCalls::executeChainAgnostic(call) => mutate(call, frame.caller, |_, c| {
                let source = c.params.params.source;
                let metadata = c.params.params.metadata.clone();
                let params =
                    (c.params, c.signaturesParams, c.chainAgnosticHashes).abi_encode_params();
                let (success, revertReason) = self.relay(
                    host,
                    frame,
                    c.owner,
                    c.index,
                    Relay::CastChainAgnostic,
                    params,
                    source,
                    metadata,
                )?;
                Ok(IAvoForwarder::executeChainAgnosticReturn {
                    success,
                    revertReason,
                })
            }),
            IAvoForwarderCalls::simulateChainAgnostic(call) => {
                mutate(call, frame.caller, |_, c| {
                    Self::check_simulation(host)?;
                    let source = c.params.params.source;
                    let metadata = c.params.params.metadata.clone();
                    let params =
                        (c.params, c.signaturesParams, c.chainAgnosticHashes).abi_encode_params();
                    let (success, revertReason) = self.relay(
                        host,
                        frame,
                        c.owner,
                        c.index,
                        Relay::SimulateCastChainAgnostic,
                        params,
                        source,
                        metadata,
                    )?;
                    Ok(IAvoForwarder::simulateChainAgnosticReturn {
                        success,
                        revertReason,
                    })
                })
            }
            IAvoForwarderCalls::verifyChainAgnostic(call) => view(call, |c| {
                let params =
                    (c.params, c.signaturesParams, c.chainAgnosticHashes).abi_encode_params();
                let input =
                    account_calldata(IAvocadoMultisig::verifyChainAgnosticCall::SELECTOR, params);
                self.verify(host, frame, c.owner, c.index, input)
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{FACTORY, assert_full_coverage, check_selector_coverage};

    #[test]
    fn test_avo_forwarder_selector_coverage() {
        let forwarder = AvoForwarder::new(FACTORY);
        let unsupported = check_selector_coverage(
            &forwarder,
            IAvoForwarderCalls::SELECTORS,
            "IAvoForwarder",
            IAvoForwarderCalls::name_by_selector,
        );
        assert_full_coverage([unsupported]);
    }
}
