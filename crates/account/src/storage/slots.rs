//! Storage layout of an Avocado account.
//!
//! Slot 0 holds the implementation pointer and is shared with the proxy, so it must stay at 0
//! across logic versions. Everything up to [`SIGNERS_HEAD`] plus the signer linked list is part of
//! the delegate-call storage fingerprint.

use alloy_primitives::{Address, B256, U256, address, uint};

use crate::storage::{Mapping, Slot};

pub const IMPLEMENTATION: Slot<Address> = Slot::new(uint!(0_U256));
pub const OWNER: Slot<Address> = Slot::new(uint!(1_U256));
pub const INDEX: Slot<u32> = Slot::new(uint!(2_U256));
pub const INITIALIZED: Slot<bool> = Slot::new(uint!(3_U256));
pub const AVO_NONCE: Slot<U256> = Slot::new(uint!(4_U256));
pub const REQUIRED_SIGNERS: Slot<u8> = Slot::new(uint!(5_U256));
/// Length of the stored signer list. Zero means the owner is the only signer.
pub const SIGNERS_COUNT: Slot<U256> = Slot::new(uint!(6_U256));
/// First (lowest) address of the stored signer list.
pub const SIGNERS_HEAD: Slot<Address> = Slot::new(uint!(7_U256));

/// Highest fixed slot covered by the storage fingerprint.
pub const LAST_PROTECTED_SLOT: u64 = 7;

/// signer -> next signer in ascending order, [`SIGNERS_TAIL`] for the last one.
pub const SIGNERS_NEXT: Mapping<Address, Address> = Mapping::new(uint!(8_U256));
/// digest -> used flag.
pub const NON_SEQUENTIAL_NONCES: Mapping<B256, bool> = Mapping::new(uint!(9_U256));

/// Terminator of the signer linked list.
///
/// Shares its value with the `ecrecover` precompile address, which has no private key, so it can
/// never be added as a signer.
pub const SIGNERS_TAIL: Address = address!("0x0000000000000000000000000000000000000001");

/// Transient slot set while a cast is executing.
pub const TRANSIENT_CAST_GUARD: U256 = uint!(0_U256);
