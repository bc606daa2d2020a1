use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use alloy_primitives::{Address, Bytes, Log, LogData, U256};
use revm::interpreter::gas::{
    CALLVALUE, COLD_SLOAD_COST, CREATE, LOG, LOGDATA, LOGTOPIC, SSTORE_SET, WARM_SSTORE_RESET,
    WARM_STORAGE_READ_COST,
};
use tracing::trace;

use crate::{
    error::{AvocadoError, Result},
    host::{
        CallInputs, CallKind, CallOutcome, Checkpoint, Frame, Host, Program, max_forwardable_gas,
    },
};

/// In-memory [`Host`] used by tests and off-chain simulation.
///
/// Keeps a journal of every state change so failing frames and explicit checkpoints can be rolled
/// back, meters gas per frame with the EVM cost schedule and applies the 63/64 forwarding rule.
/// Outside of a frame (direct use in unit tests) gas is unlimited.
pub struct MemoryHost {
    chain_id: u64,
    timestamp: U256,
    gas_price: U256,
    origin: Address,
    storage: HashMap<(Address, U256), U256>,
    transient: HashMap<(Address, U256), U256>,
    balances: HashMap<Address, U256>,
    programs: HashMap<Address, Rc<dyn Program>>,
    warm_slots: HashSet<(Address, U256)>,
    logs: Vec<Log>,
    journal: Vec<JournalEntry>,
    frames: Vec<FrameState>,
}

enum JournalEntry {
    Storage { address: Address, key: U256, previous: U256 },
    Transient { address: Address, key: U256, previous: U256 },
    Balance { address: Address, previous: U256 },
    Code { address: Address, previous: Option<Rc<dyn Program>> },
}

struct FrameState {
    caller: Address,
    value: U256,
    is_static: bool,
    gas_limit: u64,
    gas_used: u64,
}

/// Result of a top-level transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub success: bool,
    pub output: Bytes,
    pub gas_used: u64,
    /// Logs emitted by the transaction. Empty when it reverted.
    pub logs: Vec<Log>,
}

impl MemoryHost {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            timestamp: U256::from(1),
            gas_price: U256::ZERO,
            origin: Address::ZERO,
            storage: HashMap::new(),
            transient: HashMap::new(),
            balances: HashMap::new(),
            programs: HashMap::new(),
            warm_slots: HashSet::new(),
            logs: Vec::new(),
            journal: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn set_timestamp(&mut self, timestamp: U256) {
        self.timestamp = timestamp;
    }

    pub fn set_gas_price(&mut self, gas_price: U256) {
        self.gas_price = gas_price;
    }

    pub fn set_balance(&mut self, address: Address, balance: U256) {
        self.balances.insert(address, balance);
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    /// Reads storage without charging gas or warming the slot.
    pub fn storage_at(&self, address: Address, key: U256) -> U256 {
        self.storage.get(&(address, key)).copied().unwrap_or_default()
    }

    pub fn set_storage(&mut self, address: Address, key: U256, value: U256) {
        self.storage.insert((address, key), value);
    }

    /// Installs a program outside of any transaction.
    pub fn install(&mut self, address: Address, program: Rc<dyn Program>) {
        self.programs.insert(address, program);
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.programs.contains_key(&address)
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Runs a top-level transaction from `caller` to `target`.
    pub fn transact(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        input: Bytes,
        gas_limit: u64,
    ) -> Result<TxOutcome> {
        let logs_start = self.logs.len();
        self.origin = caller;
        let frame = Frame {
            address: target,
            code_address: target,
            caller,
            value,
            input,
            is_static: false,
        };

        let outcome = self.run_frame(frame, gas_limit, Some((caller, value)));

        // Transaction boundary: transient storage and access lists do not outlive it.
        self.transient.clear();
        self.warm_slots.clear();
        self.journal.clear();
        let outcome = outcome?;

        trace!(%caller, %target, success = outcome.success, gas_used = outcome.gas_used, "transaction executed");

        Ok(TxOutcome {
            success: outcome.success,
            output: outcome.output,
            gas_used: outcome.gas_used,
            logs: self.logs[logs_start..].to_vec(),
        })
    }

    fn run_frame(
        &mut self,
        frame: Frame,
        gas_limit: u64,
        transfer: Option<(Address, U256)>,
    ) -> Result<CallOutcome> {
        let checkpoint = self.checkpoint();

        if let Some((from, value)) = transfer
            && !value.is_zero()
        {
            if self.balance_of(from) < value {
                return Ok(CallOutcome {
                    success: false,
                    output: Bytes::new(),
                    gas_limit,
                    gas_used: 0,
                });
            }
            self.move_balance(from, frame.address, value);
        }

        let Some(program) = self.programs.get(&frame.code_address).cloned() else {
            return Ok(CallOutcome {
                success: true,
                output: Bytes::new(),
                gas_limit,
                gas_used: 0,
            });
        };

        self.frames.push(FrameState {
            caller: frame.caller,
            value: frame.value,
            is_static: frame.is_static,
            gas_limit,
            gas_used: 0,
        });
        let result = program.execute(self, &frame);
        let gas_used = self.frames.pop().map(|f| f.gas_used).unwrap_or_default();

        match result {
            Ok(output) => Ok(CallOutcome {
                success: true,
                output,
                gas_limit,
                gas_used,
            }),
            Err(AvocadoError::Fatal(msg)) => {
                self.revert_to(checkpoint);
                Err(AvocadoError::Fatal(msg))
            }
            Err(AvocadoError::OutOfGas) => {
                self.revert_to(checkpoint);
                Ok(CallOutcome {
                    success: false,
                    output: Bytes::new(),
                    gas_limit,
                    gas_used: gas_limit,
                })
            }
            Err(err) => {
                self.revert_to(checkpoint);
                Ok(CallOutcome {
                    success: false,
                    output: err.revert_data(),
                    gas_limit,
                    gas_used,
                })
            }
        }
    }

    fn move_balance(&mut self, from: Address, to: Address, value: U256) {
        let from_balance = self.balance_of(from);
        self.journal.push(JournalEntry::Balance {
            address: from,
            previous: from_balance,
        });
        self.balances.insert(from, from_balance - value);

        let to_balance = self.balance_of(to);
        self.journal.push(JournalEntry::Balance {
            address: to,
            previous: to_balance,
        });
        self.balances.insert(to, to_balance.saturating_add(value));
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.is_static() {
            return Err(AvocadoError::StaticCallViolation);
        }
        Ok(())
    }

    /// Charges gas already spent by a finished child frame.
    fn charge_child(&mut self, gas: u64) {
        if let Some(frame) = self.frames.last_mut() {
            frame.gas_used = frame.gas_used.saturating_add(gas).min(frame.gas_limit);
        }
    }
}

impl Host for MemoryHost {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn timestamp(&self) -> U256 {
        self.timestamp
    }

    fn gas_price(&self) -> U256 {
        self.gas_price
    }

    fn tx_origin(&self) -> Address {
        self.origin
    }

    fn sload(&mut self, address: Address, key: U256) -> Result<U256> {
        let cost = if self.warm_slots.insert((address, key)) {
            COLD_SLOAD_COST
        } else {
            WARM_STORAGE_READ_COST
        };
        self.deduct_gas(cost)?;

        Ok(self.storage_at(address, key))
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) -> Result<()> {
        self.ensure_mutable()?;

        let present = self.storage_at(address, key);
        let mut cost = if present == value {
            WARM_STORAGE_READ_COST
        } else if present.is_zero() {
            SSTORE_SET
        } else {
            WARM_SSTORE_RESET
        };
        if self.warm_slots.insert((address, key)) {
            cost += COLD_SLOAD_COST;
        }
        self.deduct_gas(cost)?;

        self.journal.push(JournalEntry::Storage {
            address,
            key,
            previous: present,
        });
        self.storage.insert((address, key), value);
        Ok(())
    }

    fn tload(&mut self, address: Address, key: U256) -> Result<U256> {
        self.deduct_gas(WARM_STORAGE_READ_COST)?;
        Ok(self.transient.get(&(address, key)).copied().unwrap_or_default())
    }

    fn tstore(&mut self, address: Address, key: U256, value: U256) -> Result<()> {
        self.ensure_mutable()?;
        self.deduct_gas(WARM_STORAGE_READ_COST)?;

        let previous = self.transient.insert((address, key), value).unwrap_or_default();
        self.journal.push(JournalEntry::Transient {
            address,
            key,
            previous,
        });
        Ok(())
    }

    fn emit_event(&mut self, address: Address, event: LogData) -> Result<()> {
        self.ensure_mutable()?;

        // LOG + LOGDATA * data_len + LOGTOPIC * num_topics
        let cost = LOG
            .checked_add(LOGDATA.saturating_mul(event.data.len() as u64))
            .and_then(|c| c.checked_add(LOGTOPIC * event.topics().len() as u64))
            .unwrap_or(u64::MAX);
        self.deduct_gas(cost)?;

        self.logs.push(Log {
            address,
            data: event,
        });
        Ok(())
    }

    fn balance(&mut self, address: Address) -> Result<U256> {
        self.deduct_gas(WARM_STORAGE_READ_COST)?;
        Ok(self.balance_of(address))
    }

    fn is_contract(&mut self, address: Address) -> Result<bool> {
        self.deduct_gas(WARM_STORAGE_READ_COST)?;
        Ok(self.has_code(address))
    }

    fn set_code(&mut self, address: Address, program: Rc<dyn Program>) -> Result<()> {
        self.ensure_mutable()?;
        self.deduct_gas(CREATE)?;

        let previous = self.programs.insert(address, program);
        self.journal.push(JournalEntry::Code { address, previous });
        Ok(())
    }

    fn gas_left(&self) -> u64 {
        self.frames
            .last()
            .map(|f| f.gas_limit - f.gas_used)
            .unwrap_or(u64::MAX)
    }

    fn deduct_gas(&mut self, gas: u64) -> Result<()> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };

        let remaining = frame.gas_limit - frame.gas_used;
        if gas > remaining {
            frame.gas_used = frame.gas_limit;
            return Err(AvocadoError::OutOfGas);
        }
        frame.gas_used += gas;
        Ok(())
    }

    fn is_static(&self) -> bool {
        self.frames.last().is_some_and(|f| f.is_static)
    }

    fn call(&mut self, inputs: CallInputs) -> Result<CallOutcome> {
        let (parent_caller, parent_value, parent_static) = self
            .frames
            .last()
            .map(|f| (f.caller, f.value, f.is_static))
            .unwrap_or((inputs.caller, U256::ZERO, false));

        let transfers_value = inputs.kind == CallKind::Call && !inputs.value.is_zero();
        if transfers_value && parent_static {
            return Err(AvocadoError::StaticCallViolation);
        }

        let base_cost = if transfers_value {
            WARM_STORAGE_READ_COST + CALLVALUE
        } else {
            WARM_STORAGE_READ_COST
        };
        self.deduct_gas(base_cost)?;

        let gas_limit = inputs.gas_limit.min(max_forwardable_gas(self.gas_left()));
        let (frame, transfer) = match inputs.kind {
            CallKind::Call => (
                Frame {
                    address: inputs.target,
                    code_address: inputs.target,
                    caller: inputs.caller,
                    value: inputs.value,
                    input: inputs.input,
                    is_static: parent_static,
                },
                Some((inputs.caller, inputs.value)),
            ),
            CallKind::StaticCall => (
                Frame {
                    address: inputs.target,
                    code_address: inputs.target,
                    caller: inputs.caller,
                    value: U256::ZERO,
                    input: inputs.input,
                    is_static: true,
                },
                None,
            ),
            CallKind::DelegateCall => (
                Frame {
                    address: inputs.caller,
                    code_address: inputs.target,
                    caller: parent_caller,
                    value: parent_value,
                    input: inputs.input,
                    is_static: parent_static,
                },
                None,
            ),
        };

        let outcome = self.run_frame(frame, gas_limit, transfer)?;
        self.charge_child(outcome.gas_used);
        Ok(outcome)
    }

    fn checkpoint(&mut self) -> Checkpoint {
        Checkpoint {
            journal: self.journal.len(),
            logs: self.logs.len(),
        }
    }

    fn revert_to(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.journal {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::Storage {
                    address,
                    key,
                    previous,
                } => {
                    self.storage.insert((address, key), previous);
                }
                JournalEntry::Transient {
                    address,
                    key,
                    previous,
                } => {
                    self.transient.insert((address, key), previous);
                }
                JournalEntry::Balance { address, previous } => {
                    self.balances.insert(address, previous);
                }
                JournalEntry::Code { address, previous } => match previous {
                    Some(program) => {
                        self.programs.insert(address, program);
                    }
                    None => {
                        self.programs.remove(&address);
                    }
                },
            }
        }
        self.logs.truncate(checkpoint.logs);
    }
}
