pub mod memory;

use std::rc::Rc;

use alloy_primitives::{Address, Bytes, LogData, U256};

use crate::error::Result;

/// Ledger the account code executes against.
///
/// Mirrors the subset of EVM host functionality the account, proxy, factory and forwarder need:
/// journaled persistent and transient storage, balances, logs, gas metering and nested calls.
pub trait Host {
    fn chain_id(&self) -> u64;
    fn timestamp(&self) -> U256;
    /// Effective gas price of the current transaction.
    fn gas_price(&self) -> U256;
    /// Externally owned account that signed the current transaction.
    fn tx_origin(&self) -> Address;

    fn sload(&mut self, address: Address, key: U256) -> Result<U256>;
    fn sstore(&mut self, address: Address, key: U256, value: U256) -> Result<()>;
    fn tload(&mut self, address: Address, key: U256) -> Result<U256>;
    fn tstore(&mut self, address: Address, key: U256, value: U256) -> Result<()>;
    fn emit_event(&mut self, address: Address, event: LogData) -> Result<()>;

    fn balance(&mut self, address: Address) -> Result<U256>;
    fn is_contract(&mut self, address: Address) -> Result<bool>;
    fn set_code(&mut self, address: Address, program: Rc<dyn Program>) -> Result<()>;

    /// Gas still available to the current frame.
    fn gas_left(&self) -> u64;
    fn deduct_gas(&mut self, gas: u64) -> Result<()>;
    fn is_static(&self) -> bool;

    /// Executes a nested call frame. Changes made by a failing frame are rolled back before this
    /// returns; only [`crate::error::AvocadoError::Fatal`] errors are propagated as `Err`.
    fn call(&mut self, inputs: CallInputs) -> Result<CallOutcome>;

    /// Marks the current journal position.
    fn checkpoint(&mut self) -> Checkpoint;
    /// Rolls back every state change made since `checkpoint` within the current frame.
    fn revert_to(&mut self, checkpoint: Checkpoint);
}

/// Code installed at an address.
pub trait Program {
    /// Runs the program for one call frame and returns its output.
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes>;
}

/// Execution context of one call frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Address whose storage and balance the frame operates on.
    pub address: Address,
    /// Address the executing code was loaded from. Differs from `address` for delegate calls.
    pub code_address: Address,
    pub caller: Address,
    pub value: U256,
    pub input: Bytes,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CallKind {
    #[display("call")]
    Call,
    #[display("delegatecall")]
    DelegateCall,
    #[display("staticcall")]
    StaticCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInputs {
    pub kind: CallKind,
    /// Address of the frame issuing the call.
    pub caller: Address,
    /// Callee, or the code address for delegate calls.
    pub target: Address,
    pub value: U256,
    pub input: Bytes,
    /// Requested gas. The host caps it at 63/64 of what the caller has left.
    pub gas_limit: u64,
}

impl CallInputs {
    pub fn call(caller: Address, target: Address, value: U256, input: Bytes, gas_limit: u64) -> Self {
        Self { kind: CallKind::Call, caller, target, value, input, gas_limit }
    }

    pub fn delegate_call(caller: Address, target: Address, input: Bytes, gas_limit: u64) -> Self {
        Self { kind: CallKind::DelegateCall, caller, target, value: U256::ZERO, input, gas_limit }
    }

    pub fn static_call(caller: Address, target: Address, input: Bytes, gas_limit: u64) -> Self {
        Self { kind: CallKind::StaticCall, caller, target, value: U256::ZERO, input, gas_limit }
    }
}

/// Result of a nested call frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub success: bool,
    /// Return data on success, revert data on failure.
    pub output: Bytes,
    /// Gas limit the callee actually received.
    pub gas_limit: u64,
    pub gas_used: u64,
}

impl CallOutcome {
    /// Whether the callee most likely ran out of gas.
    ///
    /// An exhausted frame leaves no revert data and consumes (nearly) all of its limit. A callee
    /// that is itself a forwarding proxy keeps 1/64 back, so anything above 63/64 counts.
    pub fn is_out_of_gas(&self) -> bool {
        !self.success
            && self.output.is_empty()
            && (self.gas_used as u128) * 64 >= (self.gas_limit as u128) * 63
    }
}

/// Opaque journal position returned by [`Host::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) journal: usize,
    pub(crate) logs: usize,
}

/// Largest gas amount a caller holding `gas_left` may forward to a callee.
pub const fn max_forwardable_gas(gas_left: u64) -> u64 {
    gas_left - gas_left / 64
}
