//! Human-readable failure reasons for reverted actions.
//!
//! Reasons are prefixed with the zero-based index of the failing action, e.g.
//! `"2_AVO__OUT_OF_GAS"`, and cut to [`REVERT_REASON_MAX_LENGTH`] bytes.

use alloy_primitives::hex;
use alloy_sol_types::{Panic, Revert, SolError};

use crate::{
    constants::{
        REASON_CUSTOM_ERROR, REASON_NOT_DEFINED, REASON_OUT_OF_GAS, REASON_TARGET_PANICKED,
        REVERT_REASON_MAX_LENGTH,
    },
    host::CallOutcome,
};

/// Reason for the action at `index` that produced the failed `outcome`.
pub fn action_failure_reason(index: usize, outcome: &CallOutcome) -> String {
    if outcome.is_out_of_gas() {
        return indexed(index, REASON_OUT_OF_GAS);
    }
    decode_revert_reason(index, &outcome.output)
}

/// Decodes revert data of the action at `index`.
pub fn decode_revert_reason(index: usize, output: &[u8]) -> String {
    indexed(index, &describe_revert(output))
}

/// Describes revert data without an action index.
pub fn describe_revert(output: &[u8]) -> String {
    if output.len() < 4 {
        return REASON_NOT_DEFINED.to_string();
    }

    if let Ok(revert) = Revert::abi_decode(output) {
        return revert.reason;
    }
    if let Ok(panic) = Panic::abi_decode(output) {
        return format!("{REASON_TARGET_PANICKED}: 0x{:x}", panic.code);
    }

    let (selector, params) = output.split_at(4);
    format!(
        "{REASON_CUSTOM_ERROR}: 0x{}. PARAMS_RAW: 0x{}",
        hex::encode(selector),
        hex::encode(params)
    )
}

/// Prefixes `reason` with `"{index}_"` and truncates the result.
pub fn indexed(index: usize, reason: &str) -> String {
    truncate_reason(format!("{index}_{reason}"))
}

/// Cuts `reason` to at most [`REVERT_REASON_MAX_LENGTH`] bytes on a char boundary.
pub fn truncate_reason(mut reason: String) -> String {
    if reason.len() > REVERT_REASON_MAX_LENGTH {
        let mut end = REVERT_REASON_MAX_LENGTH;
        while !reason.is_char_boundary(end) {
            end -= 1;
        }
        reason.truncate(end);
    }
    reason
}
