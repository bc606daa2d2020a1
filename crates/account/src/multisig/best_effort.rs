use alloy_primitives::{Address, Bytes, U256};

use super::{AvocadoMultisig, reason::describe_revert};
use crate::{constants::REASON_OUT_OF_GAS, error::Result, host::CallInputs};

/// Outcome of a call whose failure must not revert the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BestEffort {
    Done,
    Failed { reason: String },
}

impl AvocadoMultisig<'_> {
    /// Calls `target` and reports failure instead of reverting. Only fatal host errors propagate.
    pub(crate) fn best_effort_call(
        &mut self,
        target: Address,
        value: U256,
        input: Bytes,
        gas_limit: u64,
    ) -> Result<BestEffort> {
        let outcome = self.host.call(CallInputs::call(
            self.address,
            target,
            value,
            input,
            gas_limit,
        ))?;

        if outcome.success {
            Ok(BestEffort::Done)
        } else if outcome.is_out_of_gas() {
            Ok(BestEffort::Failed {
                reason: REASON_OUT_OF_GAS.to_string(),
            })
        } else {
            Ok(BestEffort::Failed {
                reason: describe_revert(&outcome.output),
            })
        }
    }
}
