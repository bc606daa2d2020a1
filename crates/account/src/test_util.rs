//! Mock programs and a wired-up account fixture for tests.

use std::rc::Rc;

use alloy_primitives::{Address, B256, Bytes, I256, U256, address};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Panic, Revert, SolCall, SolError, SolInterface};
use avocado_contracts::{
    ERC1271_MAGIC_VALUE, FEE_MODE_ABSOLUTE, IAvoFactory, IAvoForwarder, IAvoRegistry,
    IAvoRegistry::IAvoRegistryCalls, IAvoSignersList::IAvoSignersListCalls, IAvocadoMultisig,
    IERC1271::IERC1271Calls,
};

use crate::{
    config::AvocadoConfig,
    dispatch::{dispatch_call, mutate, mutate_void, view},
    error::{AvocadoError, Result},
    factory::{AvoFactory, compute_avocado_address},
    forwarder::AvoForwarder,
    host::{
        Frame, Host, Program,
        memory::{MemoryHost, TxOutcome},
    },
    multisig::{AvocadoMultisigLogic, cast_authorized_digest, cast_digest, recover_signer},
    storage::{mapping_slot, slots::IMPLEMENTATION},
};

use IAvocadoMultisig::{
    Action, CastAuthorizedParams, CastChainAgnosticParams, CastForwardParams, CastParams,
    ChainAgnosticHash, SignatureParams,
};

pub const TEST_CHAIN_ID: u64 = 137;
pub const TEST_TIMESTAMP: u64 = 1_700_000_000;
pub const TX_GAS_LIMIT: u64 = 10_000_000;

pub const REGISTRY: Address = address!("0x000000000000000000000000000000000000a0a1");
pub const SIGNERS_LIST: Address = address!("0x000000000000000000000000000000000000a0a2");
pub const FEE_COLLECTOR: Address = address!("0x000000000000000000000000000000000000a0c1");
pub const FACTORY: Address = address!("0x000000000000000000000000000000000000a0f1");
pub const FORWARDER: Address = address!("0x000000000000000000000000000000000000a0f2");
pub const LOGIC: Address = address!("0x000000000000000000000000000000000000a0f3");
pub const BROADCASTER: Address = address!("0x000000000000000000000000000000000000b0b0");

pub const TEST_MIN_FEE: u64 = 100;
pub const TEST_MAX_FEE: u64 = 1_000_000_000_000_000_000;

pub fn test_config() -> AvocadoConfig {
    AvocadoConfig {
        registry: REGISTRY,
        signers_list: Address::ZERO,
        factory: FACTORY,
        authorized_min_fee: U256::from(TEST_MIN_FEE),
        authorized_max_fee: U256::from(TEST_MAX_FEE),
        authorized_fee_collector: FEE_COLLECTOR,
    }
}

fn revert_with(reason: &str) -> AvocadoError {
    AvocadoError::Revert(
        Revert {
            reason: reason.to_string(),
        }
        .abi_encode()
        .into(),
    )
}

/// What the mock registry answers to `calcFee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeResponse {
    Returns {
        fee: U256,
        collector: Address,
        mode: u8,
    },
    Reverts,
    /// A single word instead of `(uint256, address, uint8)`.
    Malformed,
    BurnsGas,
}

impl Default for FeeResponse {
    fn default() -> Self {
        Self::Returns {
            fee: U256::ZERO,
            collector: FEE_COLLECTOR,
            mode: FEE_MODE_ABSOLUTE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    forwarders: Vec<Address>,
    implementations: Vec<Address>,
    fee: FeeResponse,
}

impl MockRegistry {
    pub fn with_forwarder(mut self, forwarder: Address) -> Self {
        self.forwarders.push(forwarder);
        self
    }

    pub fn with_implementation(mut self, implementation: Address) -> Self {
        self.implementations.push(implementation);
        self
    }

    pub fn with_fee(mut self, fee: FeeResponse) -> Self {
        self.fee = fee;
        self
    }
}

impl Program for MockRegistry {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        dispatch_call(&frame.input, IAvoRegistryCalls::abi_decode, |call| match call {
            IAvoRegistryCalls::isValidImplementation(call) => {
                view(call, |c| Ok(self.implementations.contains(&c.avoImpl)))
            }
            IAvoRegistryCalls::isValidForwarder(call) => {
                view(call, |c| Ok(self.forwarders.contains(&c.avoForwarder)))
            }
            IAvoRegistryCalls::calcFee(call) => match &self.fee {
                FeeResponse::Returns {
                    fee,
                    collector,
                    mode,
                } => view(call, |_| {
                    Ok(IAvoRegistry::calcFeeReturn {
                        fee: *fee,
                        feeCollector: *collector,
                        mode: *mode,
                    })
                }),
                FeeResponse::Reverts => Err(revert_with("fee unavailable")),
                FeeResponse::Malformed => Ok(U256::from(1).to_be_bytes_vec().into()),
                FeeResponse::BurnsGas => loop {
                    host.deduct_gas(1_000)?;
                },
            },
        })
    }
}

/// Signer index keeping `avocado -> signer` flags in its own storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSignersList {
    pub reverts: bool,
}

impl MockSignersList {
    fn entry(avocado: Address, signer: Address) -> U256 {
        mapping_slot(
            U256::from_be_bytes(signer.into_word().0),
            mapping_slot(U256::from_be_bytes(avocado.into_word().0), U256::ZERO),
        )
    }

    /// Reads the recorded membership without a transaction.
    pub fn is_signer_of(host: &MemoryHost, list: Address, avocado: Address, signer: Address) -> bool {
        !host.storage_at(list, Self::entry(avocado, signer)).is_zero()
    }
}

impl Program for MockSignersList {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        let list = frame.address;
        dispatch_call(&frame.input, IAvoSignersListCalls::abi_decode, |call| match call {
            IAvoSignersListCalls::notifySignerAdded(call) => {
                mutate_void(call, frame.caller, |_, c| {
                    if self.reverts {
                        return Err(revert_with("signers list paused"));
                    }
                    host.sstore(list, Self::entry(c.avocado, c.signer), U256::from(1))
                })
            }
            IAvoSignersListCalls::notifySignerRemoved(call) => {
                mutate_void(call, frame.caller, |_, c| {
                    if self.reverts {
                        return Err(revert_with("signers list paused"));
                    }
                    host.sstore(list, Self::entry(c.avocado, c.signer), U256::ZERO)
                })
            }
            IAvoSignersListCalls::isSignerOf(call) => view(call, |c| {
                Ok(!host.sload(list, Self::entry(c.avocado, c.signer))?.is_zero())
            }),
        })
    }
}

avocado_contracts::sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IMockErc20 {
        function mint(address to, uint256 amount) external;
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Minimal ERC-20 with open minting. Balances live at mapping 0, allowances at mapping 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockErc20;

impl MockErc20 {
    fn word(address: Address) -> U256 {
        U256::from_be_bytes(address.into_word().0)
    }

    fn balance_slot(owner: Address) -> U256 {
        mapping_slot(Self::word(owner), U256::ZERO)
    }

    fn allowance_slot(owner: Address, spender: Address) -> U256 {
        mapping_slot(Self::word(spender), mapping_slot(Self::word(owner), U256::from(1)))
    }

    pub fn allowance_of(host: &MemoryHost, token: Address, owner: Address, spender: Address) -> U256 {
        host.storage_at(token, Self::allowance_slot(owner, spender))
    }

    pub fn balance_of(host: &MemoryHost, token: Address, owner: Address) -> U256 {
        host.storage_at(token, Self::balance_slot(owner))
    }
}

impl Program for MockErc20 {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        use IMockErc20::IMockErc20Calls;

        let token = frame.address;
        dispatch_call(&frame.input, IMockErc20Calls::abi_decode, |call| match call {
            IMockErc20Calls::mint(call) => mutate_void(call, frame.caller, |_, c| {
                let slot = Self::balance_slot(c.to);
                let balance = host.sload(token, slot)?;
                host.sstore(token, slot, balance.saturating_add(c.amount))
            }),
            IMockErc20Calls::approve(call) => mutate(call, frame.caller, |sender, c| {
                host.sstore(token, Self::allowance_slot(sender, c.spender), c.amount)?;
                Ok(true)
            }),
            IMockErc20Calls::transferFrom(call) => mutate(call, frame.caller, |sender, c| {
                let allowance_slot = Self::allowance_slot(c.from, sender);
                let allowance = host.sload(token, allowance_slot)?;
                if allowance < c.amount {
                    return Err(revert_with("insufficient allowance"));
                }
                let from_slot = Self::balance_slot(c.from);
                let from_balance = host.sload(token, from_slot)?;
                if from_balance < c.amount {
                    return Err(revert_with("insufficient balance"));
                }
                let to_slot = Self::balance_slot(c.to);
                let to_balance = host.sload(token, to_slot)?;

                host.sstore(token, allowance_slot, allowance - c.amount)?;
                host.sstore(token, from_slot, from_balance - c.amount)?;
                host.sstore(token, to_slot, to_balance.saturating_add(c.amount))?;
                Ok(true)
            }),
            IMockErc20Calls::allowance(call) => view(call, |c| {
                host.sload(token, Self::allowance_slot(c.owner, c.spender))
            }),
            IMockErc20Calls::balanceOf(call) => {
                view(call, |c| host.sload(token, Self::balance_slot(c.owner)))
            }
        })
    }
}

/// Contract signer accepting ECDSA signatures of `key`.
#[derive(Debug, Clone, Copy)]
pub struct MockErc1271Signer {
    pub key: Address,
}

impl Program for MockErc1271Signer {
    fn execute(&self, _host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        dispatch_call(&frame.input, IERC1271Calls::abi_decode, |call| match call {
            IERC1271Calls::isValidSignature(call) => view(call, |c| {
                Ok(if recover_signer(c.hash, &c.signature) == Some(self.key) {
                    ERC1271_MAGIC_VALUE
                } else {
                    [0xff; 4].into()
                })
            }),
        })
    }
}

/// Action target with a fixed behavior, independent of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockTarget {
    Succeed,
    RevertString(String),
    Panic(u64),
    /// Reverts with selector `0xdeadbeef` and one word `1`.
    CustomError,
    RevertEmpty,
    BurnGas,
    /// Overwrites the implementation pointer of the frame's storage.
    ClobberImplementation,
    WriteSlot { key: U256, value: U256 },
}

/// Implementation pointer written by [`MockTarget::ClobberImplementation`].
pub const CLOBBERED_IMPLEMENTATION: Address = address!("0x000000000000000000000000000000000000bad0");

impl Program for MockTarget {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        match self {
            Self::Succeed => Ok(Bytes::new()),
            Self::RevertString(reason) => Err(revert_with(reason)),
            Self::Panic(code) => Err(AvocadoError::Revert(
                Panic {
                    code: U256::from(*code),
                }
                .abi_encode()
                .into(),
            )),
            Self::CustomError => {
                let mut data = vec![0xde, 0xad, 0xbe, 0xef];
                data.extend_from_slice(&U256::from(1).to_be_bytes::<32>());
                Err(AvocadoError::Revert(data.into()))
            }
            Self::RevertEmpty => Err(AvocadoError::Revert(Bytes::new())),
            Self::BurnGas => loop {
                host.deduct_gas(1_000)?;
            },
            Self::ClobberImplementation => {
                IMPLEMENTATION.write(host, frame.address, CLOBBERED_IMPLEMENTATION)?;
                Ok(Bytes::new())
            }
            Self::WriteSlot { key, value } => {
                host.sstore(frame.address, *key, *value)?;
                Ok(Bytes::new())
            }
        }
    }
}

/// Feeds every selector of an interface to `program` as bare calldata and returns the names of
/// those it does not dispatch.
pub fn check_selector_coverage(
    program: &dyn Program,
    selectors: &[[u8; 4]],
    interface: &str,
    name_by_selector: impl Fn([u8; 4]) -> Option<&'static str>,
) -> Vec<String> {
    let mut host = MemoryHost::new(TEST_CHAIN_ID);
    let mut unsupported = Vec::new();
    for selector in selectors {
        let frame = Frame {
            address: LOGIC,
            code_address: LOGIC,
            caller: BROADCASTER,
            value: U256::ZERO,
            input: Bytes::copy_from_slice(selector),
            is_static: false,
        };
        if let Err(AvocadoError::UnknownSelector(_)) = program.execute(&mut host, &frame) {
            let name = name_by_selector(*selector).unwrap_or("<unnamed>");
            unsupported.push(format!("{interface}.{name}"));
        }
    }
    unsupported
}

pub fn assert_full_coverage(results: impl IntoIterator<Item = Vec<String>>) {
    let unsupported: Vec<String> = results.into_iter().flatten().collect();
    assert!(unsupported.is_empty(), "unsupported selectors: {unsupported:?}");
}

/// Signs `digest` with every key, ordered by signer address.
pub fn sign_sorted(digest: B256, keys: &[&PrivateKeySigner]) -> Result<Vec<SignatureParams>> {
    let mut signatures = keys
        .iter()
        .map(|key| -> Result<SignatureParams> {
            let signature = key
                .sign_hash_sync(&digest)
                .map_err(|err| AvocadoError::Fatal(err.to_string()))?;
            Ok(SignatureParams {
                signature: signature.as_bytes().to_vec().into(),
                signer: key.address(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    signatures.sort_by_key(|s| s.signer);
    Ok(signatures)
}

/// Action calling `target` with `data`.
pub fn call_action(target: Address, data: impl Into<Bytes>) -> Action {
    Action {
        target,
        data: data.into(),
        value: U256::ZERO,
        operation: U256::from(Action::CALL),
    }
}

/// A [`MemoryHost`] with registry, signers list, logic, factory and forwarder installed, and a
/// random owner whose account at index 0 is not deployed yet.
pub struct AccountFixture {
    pub host: MemoryHost,
    pub config: AvocadoConfig,
    pub owner: PrivateKeySigner,
    pub index: u32,
    pub account: Address,
}

impl Default for AccountFixture {
    fn default() -> Self {
        Self::new(MockRegistry::default())
    }
}

impl AccountFixture {
    /// Installs `registry` with the fixture's forwarder and logic whitelisted.
    pub fn new(registry: MockRegistry) -> Self {
        let config = AvocadoConfig {
            signers_list: SIGNERS_LIST,
            ..test_config()
        };

        let mut host = MemoryHost::new(TEST_CHAIN_ID);
        host.set_timestamp(U256::from(TEST_TIMESTAMP));
        host.install(
            REGISTRY,
            Rc::new(
                registry
                    .with_forwarder(FORWARDER)
                    .with_implementation(LOGIC),
            ),
        );
        host.install(SIGNERS_LIST, Rc::new(MockSignersList::default()));
        host.install(LOGIC, Rc::new(AvocadoMultisigLogic::new(config.clone())));
        host.install(FACTORY, Rc::new(AvoFactory::new(LOGIC)));
        host.install(FORWARDER, Rc::new(AvoForwarder::new(FACTORY)));

        let owner = PrivateKeySigner::random();
        let account = compute_avocado_address(FACTORY, owner.address(), 0);
        Self {
            host,
            config,
            owner,
            index: 0,
            account,
        }
    }

    /// Deploys the account through the factory with extra `signers`.
    pub fn deploy(&mut self, signers: Vec<Address>, required_signers: u8) -> Result<TxOutcome> {
        let call = IAvoFactory::deployWithSignersCall {
            owner: self.owner.address(),
            index: self.index,
            signers,
            requiredSigners: required_signers,
        };
        self.host
            .transact(BROADCASTER, FACTORY, U256::ZERO, call.abi_encode().into(), TX_GAS_LIMIT)
    }

    /// Runs a read-only call against `target` and decodes its return value.
    pub fn read<C: SolCall>(&mut self, target: Address, call: C) -> Result<C::Return> {
        let outcome =
            self.host
                .transact(BROADCASTER, target, U256::ZERO, call.abi_encode().into(), TX_GAS_LIMIT)?;
        if !outcome.success {
            return Err(AvocadoError::Revert(outcome.output));
        }
        Ok(C::abi_decode_returns(&outcome.output)?)
    }

    /// Current sequential nonce. Zero while the account is not deployed.
    pub fn avo_nonce(&mut self) -> Result<U256> {
        if !self.host.has_code(self.account) {
            return Ok(U256::ZERO);
        }
        self.read(self.account, IAvocadoMultisig::avoNonceCall {})
    }

    /// Cast parameters using the current sequential nonce.
    pub fn cast_params(&mut self, actions: Vec<Action>) -> Result<CastParams> {
        let nonce = self.avo_nonce()?;
        Ok(CastParams {
            actions,
            id: U256::ZERO,
            avoNonce: I256::from_raw(nonce),
            salt: B256::ZERO,
            source: Address::ZERO,
            metadata: Bytes::new(),
        })
    }

    pub fn forward_params(&self) -> CastForwardParams {
        CastForwardParams {
            gas: U256::ZERO,
            gasPrice: U256::ZERO,
            validAfter: U256::ZERO,
            validUntil: U256::ZERO,
            value: U256::ZERO,
        }
    }

    pub fn authorized_params(&self) -> CastAuthorizedParams {
        CastAuthorizedParams {
            maxFee: U256::ZERO,
            gasPrice: U256::ZERO,
            validAfter: U256::ZERO,
            validUntil: U256::ZERO,
            gasLimit: U256::ZERO,
        }
    }

    pub fn cast_digest(&self, params: &CastParams, forward_params: &CastForwardParams) -> B256 {
        cast_digest(self.account, TEST_CHAIN_ID, params, forward_params)
    }

    pub fn cast_authorized_digest(
        &self,
        params: &CastParams,
        authorized_params: &CastAuthorizedParams,
    ) -> B256 {
        cast_authorized_digest(self.account, TEST_CHAIN_ID, params, authorized_params)
    }

    /// Owner signature over a forwarded cast.
    pub fn sign_cast(
        &self,
        params: &CastParams,
        forward_params: &CastForwardParams,
    ) -> Result<Vec<SignatureParams>> {
        sign_sorted(self.cast_digest(params, forward_params), &[&self.owner])
    }

    /// Relays a cast through the forwarder as the broadcaster.
    pub fn execute(
        &mut self,
        params: CastParams,
        forward_params: CastForwardParams,
        signatures: Vec<SignatureParams>,
    ) -> Result<TxOutcome> {
        let value = forward_params.value;
        let call = IAvoForwarder::executeCall {
            owner: self.owner.address(),
            index: self.index,
            params: into_forwarder_params(params),
            forwardParams: into_forwarder_forward_params(forward_params),
            signaturesParams: signatures.into_iter().map(into_forwarder_signature).collect(),
        };
        self.host
            .transact(BROADCASTER, FORWARDER, value, call.abi_encode().into(), TX_GAS_LIMIT)
    }

    /// Relays this chain's portion of a chain-agnostic cast through the forwarder.
    pub fn execute_chain_agnostic(
        &mut self,
        params: CastChainAgnosticParams,
        signatures: Vec<SignatureParams>,
        hashes: Vec<ChainAgnosticHash>,
    ) -> Result<TxOutcome> {
        let value = params.forwardParams.value;
        let call = IAvoForwarder::executeChainAgnosticCall {
            owner: self.owner.address(),
            index: self.index,
            params: into_forwarder_chain_agnostic_params(params),
            signaturesParams: signatures.into_iter().map(into_forwarder_signature).collect(),
            chainAgnosticHashes: hashes.into_iter().map(into_forwarder_hash).collect(),
        };
        self.host
            .transact(BROADCASTER, FORWARDER, value, call.abi_encode().into(), TX_GAS_LIMIT)
    }

    /// Sends a forwarder simulation of a cast in a transaction from `origin`.
    pub fn simulate(
        &mut self,
        origin: Address,
        params: CastParams,
        forward_params: CastForwardParams,
        signatures: Vec<SignatureParams>,
    ) -> Result<TxOutcome> {
        let value = forward_params.value;
        let call = IAvoForwarder::simulateCall {
            owner: self.owner.address(),
            index: self.index,
            params: into_forwarder_params(params),
            forwardParams: into_forwarder_forward_params(forward_params),
            signaturesParams: signatures.into_iter().map(into_forwarder_signature).collect(),
        };
        self.host
            .transact(origin, FORWARDER, value, call.abi_encode().into(), TX_GAS_LIMIT)
    }

    /// Sends a forwarder simulation of a chain-agnostic portion in a transaction from `origin`.
    pub fn simulate_chain_agnostic(
        &mut self,
        origin: Address,
        params: CastChainAgnosticParams,
        signatures: Vec<SignatureParams>,
        hashes: Vec<ChainAgnosticHash>,
    ) -> Result<TxOutcome> {
        let value = params.forwardParams.value;
        let call = IAvoForwarder::simulateChainAgnosticCall {
            owner: self.owner.address(),
            index: self.index,
            params: into_forwarder_chain_agnostic_params(params),
            signaturesParams: signatures.into_iter().map(into_forwarder_signature).collect(),
            chainAgnosticHashes: hashes.into_iter().map(into_forwarder_hash).collect(),
        };
        self.host
            .transact(origin, FORWARDER, value, call.abi_encode().into(), TX_GAS_LIMIT)
    }

    /// Submits an authorized cast directly to the account as `sender`.
    pub fn cast_authorized(
        &mut self,
        sender: Address,
        params: CastParams,
        authorized_params: CastAuthorizedParams,
        signatures: Vec<SignatureParams>,
    ) -> Result<TxOutcome> {
        let call = IAvocadoMultisig::castAuthorizedCall {
            params,
            authorizedParams: authorized_params,
            signaturesParams: signatures,
        };
        self.host
            .transact(sender, self.account, U256::ZERO, call.abi_encode().into(), TX_GAS_LIMIT)
    }
}

/// Decodes the `(success, revertReason)` return of a relayed or direct cast.
pub fn cast_result(outcome: &TxOutcome) -> Result<(bool, String)> {
    if !outcome.success {
        return Err(AvocadoError::Revert(outcome.output.clone()));
    }
    let ret = IAvocadoMultisig::castCall::abi_decode_returns(&outcome.output)?;
    Ok((ret.success, ret.revertReason))
}

pub fn into_forwarder_params(params: CastParams) -> IAvoForwarder::CastParams {
    IAvoForwarder::CastParams {
        actions: params
            .actions
            .into_iter()
            .map(|a| IAvoForwarder::Action {
                target: a.target,
                data: a.data,
                value: a.value,
                operation: a.operation,
            })
            .collect(),
        id: params.id,
        avoNonce: params.avoNonce,
        salt: params.salt,
        source: params.source,
        metadata: params.metadata,
    }
}

pub fn into_forwarder_forward_params(params: CastForwardParams) -> IAvoForwarder::CastForwardParams {
    IAvoForwarder::CastForwardParams {
        gas: params.gas,
        gasPrice: params.gasPrice,
        validAfter: params.validAfter,
        validUntil: params.validUntil,
        value: params.value,
    }
}

pub fn into_forwarder_chain_agnostic_params(
    params: CastChainAgnosticParams,
) -> IAvoForwarder::CastChainAgnosticParams {
    IAvoForwarder::CastChainAgnosticParams {
        params: into_forwarder_params(params.params),
        forwardParams: into_forwarder_forward_params(params.forwardParams),
        chainId: params.chainId,
    }
}

pub fn into_forwarder_hash(hash: ChainAgnosticHash) -> IAvoForwarder::ChainAgnosticHash {
    IAvoForwarder::ChainAgnosticHash {
        hash: hash.hash,
        chainId: hash.chainId,
    }
}

pub fn into_forwarder_signature(signature: SignatureParams) -> IAvoForwarder::SignatureParams {
    IAvoForwarder::SignatureParams {
        signature: signature.signature,
        signer: signature.signer,
    }
}
