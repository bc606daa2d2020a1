use alloy_primitives::{Address, address};

/// EIP-712 domain name.
pub const DOMAIN_SEPARATOR_NAME: &str = "Avocado-Multisig";
/// EIP-712 domain version. Also the logic version reported by the account.
pub const DOMAIN_SEPARATOR_VERSION: &str = "1.1.0";

/// Chain id every standard and authorized digest is pinned to, independent of the live chain.
pub const DEFAULT_CHAIN_ID: u64 = 634;

/// Upper bound of the stored signer list, owner included.
pub const MAX_SIGNERS_COUNT: usize = 90;

/// Max entries accepted by `occupyAvoNonces` and the nonce action builders.
pub const MAX_OCCUPY_NONCES: usize = 5;

/// Sentinel caller allowed to run `simulate*` entry points for gas estimation.
pub const DEAD_ADDRESS: Address = address!("0x000000000000000000000000000000000000dEaD");

/// Revert reasons longer than this are cut to bound emitted event size.
pub const REVERT_REASON_MAX_LENGTH: usize = 250;

/// Gas kept back from actions for the cast events and nonce bookkeeping that follow them.
pub const CAST_EVENTS_RESERVE_GAS: u64 = 60_000;
/// Additional gas kept back from actions of authorized casts for fee settlement.
pub const FEE_RESERVE_GAS: u64 = 80_000;
/// Gas forwarded to the registry when computing a fee.
pub const FEE_REGISTRY_GAS_STIPEND: u64 = 30_000;
/// Gas forwarded to the fee collector with the fee transfer.
pub const FEE_TRANSFER_GAS: u64 = 30_000;
/// Gas forwarded to the signers list for one best-effort notification.
pub const SIGNERS_LIST_SYNC_GAS: u64 = 50_000;
/// Flat cost charged per recovered ECDSA signature, as the `ecrecover` precompile does.
pub const ECRECOVER_GAS: u64 = 3_000;

/// Execution id allowing only `call` actions.
pub const ID_CALL_ONLY: u8 = 0;
/// Execution id allowing `call` and `delegatecall` actions.
pub const ID_MIXED: u8 = 1;

pub const REASON_OUT_OF_GAS: &str = "AVO__OUT_OF_GAS";
pub const REASON_NOT_DEFINED: &str = "AVO__REASON_NOT_DEFINED";
pub const REASON_MODIFIED_STORAGE: &str = "AVO__MODIFIED_STORAGE";
pub const REASON_OPERATION_NOT_EXIST: &str = "AVO__OPERATION_NOT_EXIST";
pub const REASON_ID_ACTION_MISMATCH: &str = "AVO__ID_ACTION_MISMATCH";
pub const REASON_INVALID_ID_OR_OPERATION: &str = "AVO__INVALID_ID_OR_OPERATION";
pub const REASON_VALUE_EXCEEDS_ALLOWED: &str = "AVO__VALUE_EXCEEDS_ALLOWED";
pub const REASON_TARGET_PANICKED: &str = "TARGET_PANICKED";
pub const REASON_CUSTOM_ERROR: &str = "CUSTOM_ERROR";
