//! ABI routing helpers shared by every program.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolInterface};
use revm::interpreter::gas::COPY;

use crate::error::{AvocadoError, Result};

/// Decodes `calldata` with `decode` and hands the call to `f`.
pub fn dispatch_call<T: SolInterface>(
    calldata: &[u8],
    decode: impl FnOnce(&[u8]) -> alloy_sol_types::Result<T>,
    f: impl FnOnce(T) -> Result<Bytes>,
) -> Result<Bytes> {
    let Some(selector) = calldata.first_chunk::<4>() else {
        return Err(unknown_selector(calldata));
    };

    let call = decode(calldata).map_err(|err| match err {
        alloy_sol_types::Error::UnknownSelector { .. } => AvocadoError::UnknownSelector(*selector),
        err => err.into(),
    })?;
    f(call)
}

fn unknown_selector(calldata: &[u8]) -> AvocadoError {
    let mut selector = [0u8; 4];
    selector[..calldata.len()].copy_from_slice(calldata);
    AvocadoError::UnknownSelector(selector)
}

/// Runs a read-only call and ABI-encodes its return value.
pub fn view<C: SolCall>(call: C, f: impl FnOnce(C) -> Result<C::Return>) -> Result<Bytes> {
    f(call).map(|ret| C::abi_encode_returns(&ret).into())
}

/// Runs a state-changing call on behalf of `sender` and ABI-encodes its return value.
pub fn mutate<C: SolCall>(
    call: C,
    sender: Address,
    f: impl FnOnce(Address, C) -> Result<C::Return>,
) -> Result<Bytes> {
    f(sender, call).map(|ret| C::abi_encode_returns(&ret).into())
}

/// Runs a state-changing call without return values.
pub fn mutate_void<C: SolCall>(
    call: C,
    sender: Address,
    f: impl FnOnce(Address, C) -> Result<()>,
) -> Result<Bytes> {
    f(sender, call).map(|()| Bytes::new())
}

/// Gas charged for copying `len` bytes of calldata.
pub const fn input_cost(len: usize) -> u64 {
    (len as u64).div_ceil(32) * COPY
}
