use alloy_primitives::{B256, U256, keccak256};
use tracing::{debug, warn};

use super::{
    AvocadoMultisig, IAvocadoMultisig,
    reason::{action_failure_reason, indexed},
};
use crate::{
    constants::{
        ID_CALL_ONLY, ID_MIXED, REASON_ID_ACTION_MISMATCH, REASON_INVALID_ID_OR_OPERATION,
        REASON_MODIFIED_STORAGE, REASON_OPERATION_NOT_EXIST, REASON_OUT_OF_GAS,
        REASON_VALUE_EXCEEDS_ALLOWED,
    },
    error::Result,
    host::CallInputs,
    storage::slots::{LAST_PROTECTED_SLOT, SIGNERS_NEXT},
};

use IAvocadoMultisig::Action;

impl AvocadoMultisig<'_> {
    /// Executes `actions` all-or-nothing and returns the failure reason, if any.
    ///
    /// `reserve_gas` is withheld from every action so the caller can still emit its events and
    /// settle fees afterwards. On failure every change made by earlier actions is rolled back.
    pub(crate) fn execute_actions(
        &mut self,
        actions: &[Action],
        id: U256,
        reserve_gas: u64,
    ) -> Result<Option<String>> {
        let checkpoint = self.host.checkpoint();

        let failure = self.run_actions(actions, id, reserve_gas)?;
        if let Some(reason) = &failure {
            self.host.revert_to(checkpoint);
            debug!(account = %self.address, %reason, "cast actions failed");
        }
        Ok(failure)
    }

    fn run_actions(
        &mut self,
        actions: &[Action],
        id: U256,
        reserve_gas: u64,
    ) -> Result<Option<String>> {
        if self.host.gas_left() <= reserve_gas {
            return Ok(Some(REASON_OUT_OF_GAS.to_string()));
        }

        let mixed = if id == U256::from(ID_CALL_ONLY) {
            false
        } else if id == U256::from(ID_MIXED) {
            true
        } else {
            return Ok(Some(REASON_INVALID_ID_OR_OPERATION.to_string()));
        };

        let mut allowed_value = self.host.balance(self.address)?;
        for (index, action) in actions.iter().enumerate() {
            let gas_left = self.host.gas_left();
            if gas_left <= reserve_gas {
                return Ok(Some(indexed(index, REASON_OUT_OF_GAS)));
            }
            let gas_limit = gas_left - reserve_gas;

            if action.operation == U256::from(Action::CALL) {
                if action.value > allowed_value {
                    return Ok(Some(indexed(index, REASON_VALUE_EXCEEDS_ALLOWED)));
                }
                allowed_value -= action.value;

                let outcome = self.host.call(CallInputs::call(
                    self.address,
                    action.target,
                    action.value,
                    action.data.clone(),
                    gas_limit,
                ))?;
                if !outcome.success {
                    return Ok(Some(action_failure_reason(index, &outcome)));
                }
            } else if action.operation == U256::from(Action::DELEGATE_CALL) {
                if !mixed {
                    return Ok(Some(indexed(index, REASON_ID_ACTION_MISMATCH)));
                }

                let before = self.storage_fingerprint()?;
                let outcome = self.host.call(CallInputs::delegate_call(
                    self.address,
                    action.target,
                    action.data.clone(),
                    gas_limit,
                ))?;
                if !outcome.success {
                    return Ok(Some(action_failure_reason(index, &outcome)));
                }
                if self.storage_fingerprint()? != before {
                    warn!(account = %self.address, target = %action.target, index, "delegatecall modified protected storage");
                    return Ok(Some(indexed(index, REASON_MODIFIED_STORAGE)));
                }
            } else {
                return Ok(Some(indexed(index, REASON_OPERATION_NOT_EXIST)));
            }
        }
        Ok(None)
    }

    /// Hash over every protected storage word: the fixed slots and the signer linked list.
    fn storage_fingerprint(&mut self) -> Result<B256> {
        let mut words = Vec::with_capacity(LAST_PROTECTED_SLOT as usize + 1);
        for slot in 0..=LAST_PROTECTED_SLOT {
            words.extend_from_slice(&self.host.sload(self.address, U256::from(slot))?.to_be_bytes::<32>());
        }
        for signer in self.signers()? {
            let next = self.read(SIGNERS_NEXT.at(signer))?;
            words.extend_from_slice(next.as_slice());
        }
        Ok(keccak256(words))
    }
}
