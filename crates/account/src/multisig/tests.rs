//! Account behavior driven end to end through the proxy, the factory and the forwarder.

use std::rc::Rc;

use alloy_primitives::{Address, B256, Bytes, I256, U256, address, hex};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{SolCall, SolError, SolEvent, SolInterface};
use avocado_contracts::{AvoFactoryError, AvoForwarderError, IAvoForwarder};

use super::*;
use crate::{
    constants::DEAD_ADDRESS,
    error::AvocadoError,
    host::memory::TxOutcome,
    storage::slots::{SIGNERS_NEXT, SIGNERS_TAIL},
    test_util::{
        AccountFixture, BROADCASTER, FEE_COLLECTOR, FORWARDER, LOGIC, MockErc1271Signer,
        MockRegistry, MockSignersList, MockTarget, SIGNERS_LIST, TEST_CHAIN_ID, TEST_MIN_FEE,
        TEST_TIMESTAMP, TX_GAS_LIMIT, call_action, cast_result, into_forwarder_forward_params,
        into_forwarder_params, into_forwarder_signature, sign_sorted,
    },
};

use IAvocadoMultisig::{
    CastAuthorizedParams, CastChainAgnosticParams, CastForwardParams, CastParams, SignatureParams,
};

const TARGET: Address = address!("0x000000000000000000000000000000000000e0e0");

fn account_error(outcome: &TxOutcome) -> Option<AvocadoMultisigError> {
    if outcome.success {
        return None;
    }
    AvocadoMultisigError::abi_decode(&outcome.output).ok()
}

fn read_error<T: std::fmt::Debug>(result: crate::error::Result<T>) -> Option<AvocadoMultisigError> {
    match result {
        Err(AvocadoError::Revert(data)) => AvocadoMultisigError::abi_decode(&data).ok(),
        other => panic!("expected a revert, got {other:?}"),
    }
}

/// Deployed owner-only account with a succeeding action target.
fn deployed() -> eyre::Result<AccountFixture> {
    let mut fx = AccountFixture::default();
    fx.host.install(TARGET, Rc::new(MockTarget::Succeed));
    assert!(fx.deploy(Vec::new(), 1)?.success);
    Ok(fx)
}

fn signed_cast(
    fx: &mut AccountFixture,
    actions: Vec<Action>,
) -> eyre::Result<(CastParams, CastForwardParams, Vec<SignatureParams>)> {
    let params = fx.cast_params(actions)?;
    let forward = fx.forward_params();
    let signatures = fx.sign_cast(&params, &forward)?;
    Ok((params, forward, signatures))
}

fn noop() -> Action {
    call_action(TARGET, Bytes::new())
}

#[test]
fn test_deploy_initializes_account() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;

    assert_eq!(fx.read(account, IAvocadoMultisig::ownerCall {})?, fx.owner.address());
    assert_eq!(fx.read(account, IAvocadoMultisig::indexCall {})?, 0);
    assert_eq!(fx.read(account, IAvocadoMultisig::implementationCall {})?, LOGIC);
    assert_eq!(fx.read(account, IAvocadoMultisig::requiredSignersCall {})?, 1);
    assert_eq!(
        fx.read(account, IAvocadoMultisig::signersCall {})?,
        vec![fx.owner.address()]
    );
    assert_eq!(
        fx.read(FORWARDER, IAvoForwarder::computeAvocadoCall { owner: fx.owner.address(), index: 0 })?,
        account
    );

    let again = fx.deploy(Vec::new(), 1)?;
    assert!(!again.success);
    assert_eq!(
        AvoFactoryError::abi_decode(&again.output)?,
        AvoFactoryError::already_deployed(account)
    );
    Ok(())
}

#[test]
fn test_initialize_is_factory_only() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let call = IAvocadoMultisig::initializeCall {
        owner: fx.owner.address(),
        index: 0,
        signers: Vec::new(),
        requiredSigners: 1,
    };
    let outcome = fx.host.transact(
        fx.owner.address(),
        fx.account,
        U256::ZERO,
        call.abi_encode().into(),
        TX_GAS_LIMIT,
    )?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::unauthorized()));
    Ok(())
}

#[test]
fn test_cast_emits_forwarder_and_account_events() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;

    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));

    let emitted: Vec<_> = outcome
        .logs
        .iter()
        .map(|log| (log.address, log.data.topics()[0]))
        .collect();
    assert!(emitted.contains(&(fx.account, IAvocadoMultisig::CastExecuted::SIGNATURE_HASH)));
    assert!(emitted.contains(&(FORWARDER, IAvoForwarder::Executed::SIGNATURE_HASH)));
    Ok(())
}

#[test]
fn test_sequential_replay_fails() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;

    let first = fx.execute(params.clone(), forward.clone(), signatures.clone())?;
    assert_eq!(cast_result(&first)?, (true, String::new()));
    assert_eq!(fx.avo_nonce()?, U256::from(1));

    let replay = fx.execute(params, forward, signatures)?;
    assert_eq!(account_error(&replay), Some(AvocadoMultisigError::invalid_params()));
    assert_eq!(fx.avo_nonce()?, U256::from(1));
    Ok(())
}

#[test]
fn test_failed_actions_still_consume_the_nonce() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.install(TARGET, Rc::new(MockTarget::Panic(0x11)));
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;

    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(
        cast_result(&outcome)?,
        (false, "0_TARGET_PANICKED: 0x11".to_string())
    );
    assert_eq!(fx.avo_nonce()?, U256::from(1));
    Ok(())
}

#[test]
fn test_non_sequential_nonce_is_single_use() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let params = CastParams {
        avoNonce: I256::MINUS_ONE,
        ..fx.cast_params(vec![noop()])?
    };
    let forward = fx.forward_params();
    let digest = fx.cast_digest(&params, &forward);
    let signatures = sign_sorted(digest, &[&fx.owner])?;

    let first = fx.execute(params.clone(), forward.clone(), signatures.clone())?;
    assert_eq!(cast_result(&first)?, (true, String::new()));
    assert_eq!(fx.avo_nonce()?, U256::ZERO);
    let account = fx.account;
    assert!(fx.read(account, IAvocadoMultisig::nonSequentialNoncesCall { nonce: digest })?);

    let replay = fx.execute(params, forward, signatures)?;
    assert_eq!(account_error(&replay), Some(AvocadoMultisigError::invalid_params()));
    Ok(())
}

#[test]
fn test_quorum_boundary() -> eyre::Result<()> {
    let mut fx = AccountFixture::default();
    let keys = [PrivateKeySigner::random(), PrivateKeySigner::random()];
    let mut extra: Vec<Address> = keys.iter().map(|k| k.address()).collect();
    extra.sort();
    assert!(fx.deploy(extra, 2)?.success);

    let account = fx.account;
    let params = fx.cast_params(vec![noop()])?;
    let forward = fx.forward_params();
    let digest = fx.cast_digest(&params, &forward);
    let verify = |signatures| IAvocadoMultisig::verifyCall {
        params: params.clone(),
        forwardParams: forward.clone(),
        signaturesParams: signatures,
    };

    let quorum = sign_sorted(digest, &[&fx.owner, &keys[0]])?;
    assert!(fx.read(account, verify(quorum))?);

    let short = sign_sorted(digest, &[&keys[1]])?;
    assert_eq!(
        read_error(fx.read(account, verify(short))),
        Some(AvocadoMultisigError::invalid_params())
    );

    let stranger = PrivateKeySigner::random();
    let with_stranger = sign_sorted(digest, &[&fx.owner, &stranger])?;
    assert_eq!(
        read_error(fx.read(account, verify(with_stranger))),
        Some(AvocadoMultisigError::invalid_signature())
    );

    let mut unsorted = sign_sorted(digest, &[&keys[0], &keys[1]])?;
    unsorted.reverse();
    assert_eq!(
        read_error(fx.read(account, verify(unsorted))),
        Some(AvocadoMultisigError::invalid_signature())
    );

    let mut forged = sign_sorted(digest, &[&fx.owner, &keys[0]])?;
    forged[0].signature = sign_sorted(B256::repeat_byte(7), &[&stranger])?[0].signature.clone();
    assert_eq!(
        read_error(fx.read(account, verify(forged))),
        Some(AvocadoMultisigError::invalid_signature())
    );
    Ok(())
}

#[test]
fn test_invalid_timing() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let params = fx.cast_params(vec![noop()])?;
    let forward = CastForwardParams {
        validUntil: U256::from(TEST_TIMESTAMP - 1),
        ..fx.forward_params()
    };
    let signatures = fx.sign_cast(&params, &forward)?;

    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::invalid_timing()));
    Ok(())
}

#[test]
fn test_cast_requires_registered_forwarder() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;
    let call = IAvocadoMultisig::castCall {
        params,
        forwardParams: forward,
        signaturesParams: signatures,
    };

    let outcome =
        fx.host
            .transact(BROADCASTER, fx.account, U256::ZERO, call.abi_encode().into(), TX_GAS_LIMIT)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::unauthorized()));
    Ok(())
}

#[test]
fn test_insufficient_gas_sent() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let params = fx.cast_params(vec![noop()])?;
    let forward = CastForwardParams {
        gas: U256::from(TX_GAS_LIMIT),
        ..fx.forward_params()
    };
    let signatures = fx.sign_cast(&params, &forward)?;

    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(
        account_error(&outcome),
        Some(AvocadoMultisigError::insufficient_gas_sent())
    );
    Ok(())
}

#[test]
fn test_simulate_from_dead_address_skips_signatures() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let params = fx.cast_params(vec![noop()])?;
    let call = IAvocadoMultisig::simulateCastCall {
        params,
        forwardParams: fx.forward_params(),
        signaturesParams: Vec::new(),
    };

    let outcome =
        fx.host
            .transact(DEAD_ADDRESS, fx.account, U256::ZERO, call.abi_encode().into(), TX_GAS_LIMIT)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    Ok(())
}

#[test]
fn test_forwarder_verify_requires_deployment() -> eyre::Result<()> {
    let mut fx = AccountFixture::default();
    let params = fx.cast_params(vec![noop()])?;
    let call = IAvoForwarder::verifyCall {
        owner: fx.owner.address(),
        index: 0,
        params: into_forwarder_params(params),
        forwardParams: into_forwarder_forward_params(fx.forward_params()),
        signaturesParams: Vec::new(),
    };

    match fx.read(FORWARDER, call) {
        Err(AvocadoError::Revert(data)) => {
            assert_eq!(AvoForwarderError::abi_decode(&data)?, AvoForwarderError::invalid_params());
        }
        other => panic!("expected a forwarder revert, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_signer_management_through_self_calls() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;
    let signer = PrivateKeySigner::random().address();

    let (params, forward, signatures) =
        signed_cast(&mut fx, vec![add_signers_action(account, vec![signer], 1)])?;
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (true, String::new()));

    let mut expected = vec![fx.owner.address(), signer];
    expected.sort();
    assert_eq!(fx.read(account, IAvocadoMultisig::signersCall {})?, expected);
    assert_eq!(fx.read(account, IAvocadoMultisig::signersCountCall {})?, U256::from(2));
    assert!(MockSignersList::is_signer_of(&fx.host, SIGNERS_LIST, account, signer));

    let (params, forward, signatures) =
        signed_cast(&mut fx, vec![remove_signers_action(account, vec![signer], 1)])?;
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (true, String::new()));

    assert!(!fx.read(account, IAvocadoMultisig::isSignerCall { signer })?);
    assert_eq!(
        fx.read(account, IAvocadoMultisig::signersCall {})?,
        vec![fx.owner.address()]
    );
    assert!(!MockSignersList::is_signer_of(&fx.host, SIGNERS_LIST, account, signer));
    Ok(())
}

#[test]
fn test_signers_list_failure_does_not_revert() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.install(SIGNERS_LIST, Rc::new(MockSignersList { reverts: true }));
    let account = fx.account;
    let signer = PrivateKeySigner::random().address();

    let (params, forward, signatures) =
        signed_cast(&mut fx, vec![add_signers_action(account, vec![signer], 1)])?;
    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert!(fx.read(account, IAvocadoMultisig::isSignerCall { signer })?);
    assert!(
        outcome
            .logs
            .iter()
            .any(|log| log.data.topics()[0] == IAvocadoMultisig::ListSyncFailed::SIGNATURE_HASH)
    );
    Ok(())
}

#[test]
fn test_self_authorized_functions_reject_direct_calls() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let call = IAvocadoMultisig::addSignersCall {
        addSigners: vec![PrivateKeySigner::random().address()],
        requiredSigners: 1,
    };

    let outcome = fx.host.transact(
        fx.owner.address(),
        fx.account,
        U256::ZERO,
        call.abi_encode().into(),
        TX_GAS_LIMIT,
    )?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::unauthorized()));
    Ok(())
}

#[test]
fn test_upgrade_to_registered_implementation() -> eyre::Result<()> {
    let logic_v2 = address!("0x000000000000000000000000000000000000a0f4");
    let unregistered = address!("0x000000000000000000000000000000000000a0f5");

    let mut fx = AccountFixture::new(MockRegistry::default().with_implementation(logic_v2));
    fx.host.install(logic_v2, Rc::new(AvocadoMultisigLogic::new(fx.config.clone())));
    assert!(fx.deploy(Vec::new(), 1)?.success);
    let account = fx.account;

    let (params, forward, signatures) =
        signed_cast(&mut fx, vec![upgrade_to_action(account, unregistered)])?;
    let expected = format!(
        "0_CUSTOM_ERROR: 0x{}. PARAMS_RAW: 0x",
        hex::encode(IAvocadoMultisig::AvocadoMultisig__InvalidParams::SELECTOR)
    );
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (false, expected));
    assert_eq!(fx.read(account, IAvocadoMultisig::implementationCall {})?, LOGIC);

    let (params, forward, signatures) =
        signed_cast(&mut fx, vec![upgrade_to_action(account, logic_v2)])?;
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (true, String::new()));
    assert_eq!(fx.read(account, IAvocadoMultisig::implementationCall {})?, logic_v2);
    assert_eq!(fx.read(account, IAvocadoMultisig::ownerCall {})?, fx.owner.address());
    assert_eq!(fx.avo_nonce()?, U256::from(2));
    Ok(())
}

#[test]
fn test_occupy_avo_nonces() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;
    assert!(occupy_avo_nonces_action(account, vec![U256::ZERO; 6]).is_err());

    // The cast itself consumes nonce 0, so occupying starts at 1.
    let occupy = occupy_avo_nonces_action(account, vec![U256::from(1), U256::from(2)])
        .map_err(AvocadoError::from)?;
    let (params, forward, signatures) = signed_cast(&mut fx, vec![occupy])?;
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (true, String::new()));
    assert_eq!(fx.avo_nonce()?, U256::from(3));
    Ok(())
}

#[test]
fn test_occupy_non_sequential_nonces_in_bulk() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;
    let nonces: Vec<B256> = (1..=7u8).map(B256::repeat_byte).collect();
    assert!(occupy_non_sequential_nonces_action(account, nonces.clone()).is_err());

    let occupy = self_action(
        account,
        IAvocadoMultisig::occupyNonSequentialNoncesCall {
            nonSequentialNonces: nonces.clone(),
        }
        .abi_encode()
        .into(),
    );
    let (params, forward, signatures) = signed_cast(&mut fx, vec![occupy])?;
    assert_eq!(cast_result(&fx.execute(params, forward, signatures)?)?, (true, String::new()));
    for nonce in nonces {
        assert!(fx.read(account, IAvocadoMultisig::nonSequentialNoncesCall { nonce })?);
    }
    Ok(())
}

fn signed_authorized(
    fx: &mut AccountFixture,
    authorized: CastAuthorizedParams,
) -> eyre::Result<(CastParams, CastAuthorizedParams, Vec<SignatureParams>)> {
    let params = fx.cast_params(vec![noop()])?;
    let digest = fx.cast_authorized_digest(&params, &authorized);
    let signatures = sign_sorted(digest, &[&fx.owner])?;
    Ok((params, authorized, signatures))
}

#[test]
fn test_cast_authorized_pays_fee() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.set_balance(fx.account, U256::from(1_000));
    let authorized = fx.authorized_params();
    let (params, authorized, signatures) = signed_authorized(&mut fx, authorized)?;

    let outcome = fx.cast_authorized(fx.owner.address(), params, authorized, signatures)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert_eq!(fx.host.balance_of(FEE_COLLECTOR), U256::from(TEST_MIN_FEE));
    assert_eq!(fx.host.balance_of(fx.account), U256::from(1_000 - TEST_MIN_FEE));
    assert!(
        outcome
            .logs
            .iter()
            .any(|log| log.data.topics()[0] == IAvocadoMultisig::FeePaid::SIGNATURE_HASH)
    );
    Ok(())
}

#[test]
fn test_cast_authorized_rejects_non_signer() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let authorized = fx.authorized_params();
    let (params, authorized, signatures) = signed_authorized(&mut fx, authorized)?;

    let outcome = fx.cast_authorized(BROADCASTER, params, authorized, signatures)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::unauthorized()));
    Ok(())
}

#[test]
fn test_cast_authorized_max_fee() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.set_balance(fx.account, U256::from(1_000));
    let authorized = CastAuthorizedParams {
        maxFee: U256::from(50),
        ..fx.authorized_params()
    };
    let (params, authorized, signatures) = signed_authorized(&mut fx, authorized)?;

    let outcome = fx.cast_authorized(fx.owner.address(), params, authorized, signatures)?;
    assert_eq!(
        account_error(&outcome),
        Some(AvocadoMultisigError::max_fee(U256::from(TEST_MIN_FEE), U256::from(50)))
    );
    assert_eq!(fx.avo_nonce()?, U256::ZERO);
    assert_eq!(fx.host.balance_of(FEE_COLLECTOR), U256::ZERO);
    Ok(())
}

#[test]
fn test_cast_authorized_insufficient_balance() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let authorized = fx.authorized_params();
    let (params, authorized, signatures) = signed_authorized(&mut fx, authorized)?;

    let outcome = fx.cast_authorized(fx.owner.address(), params, authorized, signatures)?;
    assert_eq!(
        account_error(&outcome),
        Some(AvocadoMultisigError::insufficient_balance(U256::from(TEST_MIN_FEE)))
    );
    Ok(())
}

#[test]
fn test_contract_signer_is_checked_through_erc1271() -> eyre::Result<()> {
    let mut fx = AccountFixture::default();
    let contract_signer = address!("0x000000000000000000000000000000000000e1e1");
    let key = PrivateKeySigner::random();
    fx.host.install(contract_signer, Rc::new(MockErc1271Signer { key: key.address() }));
    fx.host.install(TARGET, Rc::new(MockTarget::Succeed));
    assert!(fx.deploy(vec![contract_signer], 2)?.success);

    let account = fx.account;
    let params = fx.cast_params(vec![noop()])?;
    let forward = fx.forward_params();
    let digest = fx.cast_digest(&params, &forward);
    let bundle = |inner: &PrivateKeySigner| -> eyre::Result<Vec<SignatureParams>> {
        let mut signatures = sign_sorted(digest, &[&fx.owner])?;
        let delegated = sign_sorted(digest, &[inner])?;
        signatures.push(SignatureParams {
            signature: delegated[0].signature.clone(),
            signer: contract_signer,
        });
        signatures.sort_by_key(|s| s.signer);
        Ok(signatures)
    };
    let valid = bundle(&key)?;
    let forged = bundle(&PrivateKeySigner::random())?;

    assert_eq!(
        read_error(fx.read(
            account,
            IAvocadoMultisig::verifyCall {
                params: params.clone(),
                forwardParams: forward.clone(),
                signaturesParams: forged,
            },
        )),
        Some(AvocadoMultisigError::invalid_signature())
    );

    let outcome = fx.execute(params, forward, valid)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert_eq!(fx.avo_nonce()?, U256::from(1));
    Ok(())
}

#[test]
fn test_out_of_gas_and_custom_error_reasons() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.install(TARGET, Rc::new(MockTarget::BurnGas));
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;
    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(cast_result(&outcome)?, (false, "0_AVO__OUT_OF_GAS".to_string()));

    fx.host.install(TARGET, Rc::new(MockTarget::CustomError));
    let (params, forward, signatures) = signed_cast(&mut fx, vec![noop()])?;
    let outcome = fx.execute(params, forward, signatures)?;
    let expected = format!(
        "0_CUSTOM_ERROR: 0xdeadbeef. PARAMS_RAW: 0x{}",
        hex::encode(U256::from(1).to_be_bytes::<32>())
    );
    assert_eq!(cast_result(&outcome)?, (false, expected));
    assert_eq!(fx.avo_nonce()?, U256::from(2));
    Ok(())
}

#[test]
fn test_delegatecall_may_write_unprotected_storage() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let key = U256::from(1_000);
    fx.host.install(TARGET, Rc::new(MockTarget::WriteSlot { key, value: U256::from(7) }));

    let delegate = Action {
        operation: U256::from(Action::DELEGATE_CALL),
        ..noop()
    };
    let params = CastParams {
        id: U256::from(1),
        ..fx.cast_params(vec![delegate])?
    };
    let forward = fx.forward_params();
    let signatures = fx.sign_cast(&params, &forward)?;

    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert_eq!(fx.host.storage_at(fx.account, key), U256::from(7));
    Ok(())
}

#[test]
fn test_simulation_requires_dead_origin() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;
    let attacker = address!("0x000000000000000000000000000000000000a77a");
    fx.host.set_balance(account, U256::from(1_000));

    let drain = Action {
        value: U256::from(1_000),
        ..call_action(attacker, Bytes::new())
    };
    let params = fx.cast_params(vec![drain])?;
    let forward = fx.forward_params();
    let forged = vec![SignatureParams {
        signature: Bytes::from(vec![0u8; 65]),
        signer: fx.owner.address(),
    }];

    let outcome = fx.simulate(attacker, params.clone(), forward.clone(), forged.clone())?;
    assert!(!outcome.success);
    assert_eq!(AvoForwarderError::abi_decode(&outcome.output)?, AvoForwarderError::unauthorized());

    let portion = CastChainAgnosticParams {
        params: params.clone(),
        forwardParams: forward.clone(),
        chainId: U256::from(TEST_CHAIN_ID),
    };
    let outcome = fx.simulate_chain_agnostic(attacker, portion, forged.clone(), Vec::new())?;
    assert_eq!(AvoForwarderError::abi_decode(&outcome.output)?, AvoForwarderError::unauthorized());

    // Calling the account directly is refused as well.
    let direct = IAvocadoMultisig::simulateCastCall {
        params,
        forwardParams: forward,
        signaturesParams: forged,
    };
    let outcome =
        fx.host
            .transact(attacker, account, U256::ZERO, direct.abi_encode().into(), TX_GAS_LIMIT)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::unauthorized()));

    assert_eq!(fx.host.balance_of(attacker), U256::ZERO);
    assert_eq!(fx.host.balance_of(account), U256::from(1_000));
    assert_eq!(fx.avo_nonce()?, U256::ZERO);
    Ok(())
}

#[test]
fn test_forwarder_simulations_from_dead_origin() -> eyre::Result<()> {
    let mut fx = AccountFixture::default();
    fx.host.install(TARGET, Rc::new(MockTarget::Succeed));

    let params = fx.cast_params(vec![noop()])?;
    let forward = fx.forward_params();
    let outcome = fx.simulate(DEAD_ADDRESS, params, forward, Vec::new())?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert!(fx.host.has_code(fx.account));

    let local = CastChainAgnosticParams {
        params: fx.cast_params(vec![noop()])?,
        forwardParams: fx.forward_params(),
        chainId: U256::from(TEST_CHAIN_ID),
    };
    let remote = CastChainAgnosticParams {
        params: CastParams {
            salt: B256::with_last_byte(3),
            ..local.params.clone()
        },
        forwardParams: fx.forward_params(),
        chainId: U256::from(3),
    };
    let hashes = chain_agnostic_hashes(&[remote, local.clone()], TEST_CHAIN_ID).map_err(AvocadoError::from)?;
    let outcome = fx.simulate_chain_agnostic(DEAD_ADDRESS, local, Vec::new(), hashes)?;
    assert_eq!(cast_result(&outcome)?, (true, String::new()));
    assert_eq!(fx.avo_nonce()?, U256::from(2));
    Ok(())
}

#[test]
fn test_delegatecall_cannot_plant_a_signer() -> eyre::Result<()> {
    let mut fx = AccountFixture::default();
    let cosigner = PrivateKeySigner::random();
    let ghost = PrivateKeySigner::random();
    assert!(fx.deploy(vec![cosigner.address()], 1)?.success);
    let account = fx.account;

    let tail = U256::from_be_bytes(SIGNERS_TAIL.into_word().0);
    let plant = MockTarget::WriteSlot {
        key: SIGNERS_NEXT.at(ghost.address()).slot(),
        value: tail,
    };
    fx.host.install(TARGET, Rc::new(plant));
    let delegate = Action {
        operation: U256::from(Action::DELEGATE_CALL),
        ..noop()
    };
    let params = CastParams {
        id: U256::from(1),
        ..fx.cast_params(vec![delegate])?
    };
    let forward = fx.forward_params();
    let signatures = fx.sign_cast(&params, &forward)?;
    assert!(fx.execute(params, forward, signatures)?.success);
    assert_eq!(fx.avo_nonce()?, U256::from(1));

    assert!(!fx.read(account, IAvocadoMultisig::isSignerCall { signer: ghost.address() })?);
    let mut expected = vec![fx.owner.address(), cosigner.address()];
    expected.sort();
    assert_eq!(fx.read(account, IAvocadoMultisig::signersCall {})?, expected);

    fx.host.install(TARGET, Rc::new(MockTarget::Succeed));
    let params = fx.cast_params(vec![noop()])?;
    let forward = fx.forward_params();
    let signatures = sign_sorted(fx.cast_digest(&params, &forward), &[&ghost])?;
    let outcome = fx.execute(params, forward, signatures)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::invalid_signature()));
    assert_eq!(fx.avo_nonce()?, U256::from(1));
    Ok(())
}

#[test]
fn test_cast_authorized_max_fee_fails_before_actions() -> eyre::Result<()> {
    let mut fx = deployed()?;
    fx.host.install(TARGET, Rc::new(MockTarget::BurnGas));
    fx.host.set_balance(fx.account, U256::from(1_000));

    let capped = CastAuthorizedParams {
        maxFee: U256::from(50),
        ..fx.authorized_params()
    };
    let (params, authorized, signatures) = signed_authorized(&mut fx, capped)?;
    let rejected = fx.cast_authorized(fx.owner.address(), params, authorized, signatures)?;
    assert_eq!(
        account_error(&rejected),
        Some(AvocadoMultisigError::max_fee(U256::from(TEST_MIN_FEE), U256::from(50)))
    );

    let uncapped = fx.authorized_params();
    let (params, authorized, signatures) = signed_authorized(&mut fx, uncapped)?;
    let burned = fx.cast_authorized(fx.owner.address(), params, authorized, signatures)?;
    assert_eq!(cast_result(&burned)?, (false, "0_AVO__OUT_OF_GAS".to_string()));

    // The rejected cast never reached the gas burning action.
    assert!(rejected.gas_used * 10 < burned.gas_used);
    Ok(())
}

#[test]
fn test_action_cannot_reenter_a_cast() -> eyre::Result<()> {
    let mut fx = deployed()?;

    // Signed for the nonce the outer cast leaves behind, so only the running cast blocks it.
    let inner = CastParams {
        avoNonce: I256::from_raw(U256::from(1)),
        ..fx.cast_params(vec![noop()])?
    };
    let forward = fx.forward_params();
    let inner_signatures = fx.sign_cast(&inner, &forward)?;
    let reenter = call_action(
        FORWARDER,
        IAvoForwarder::executeCall {
            owner: fx.owner.address(),
            index: fx.index,
            params: into_forwarder_params(inner),
            forwardParams: into_forwarder_forward_params(forward),
            signaturesParams: inner_signatures.into_iter().map(into_forwarder_signature).collect(),
        }
        .abi_encode(),
    );

    let (params, forward, signatures) = signed_cast(&mut fx, vec![reenter])?;
    let outcome = fx.execute(params, forward, signatures)?;
    let expected = format!(
        "0_CUSTOM_ERROR: 0x{}. PARAMS_RAW: 0x",
        hex::encode(IAvocadoMultisig::AvocadoMultisig__Unauthorized::SELECTOR)
    );
    assert_eq!(cast_result(&outcome)?, (false, expected));
    assert_eq!(fx.avo_nonce()?, U256::from(1));
    Ok(())
}

#[test]
fn test_chain_agnostic_portion_for_another_chain_is_rejected() -> eyre::Result<()> {
    let mut fx = deployed()?;
    let account = fx.account;

    let current = fx.cast_params(vec![noop()])?;
    let foreign = CastChainAgnosticParams {
        params: current.clone(),
        forwardParams: fx.forward_params(),
        chainId: U256::from(3),
    };
    let local = CastChainAgnosticParams {
        params: CastParams {
            salt: B256::with_last_byte(1),
            ..current
        },
        forwardParams: fx.forward_params(),
        chainId: U256::from(TEST_CHAIN_ID),
    };
    let hashes = chain_agnostic_hashes(&[foreign.clone(), local], TEST_CHAIN_ID).map_err(AvocadoError::from)?;
    let signatures = sign_sorted(chain_agnostic_digest(account, &hashes).map_err(AvocadoError::from)?, &[&fx.owner])?;

    assert_eq!(
        read_error(fx.read(
            account,
            IAvocadoMultisig::verifyChainAgnosticCall {
                params: foreign.clone(),
                signaturesParams: signatures.clone(),
                chainAgnosticHashes: hashes.clone(),
            },
        )),
        Some(AvocadoMultisigError::invalid_params())
    );

    let outcome = fx.execute_chain_agnostic(foreign, signatures, hashes)?;
    assert_eq!(account_error(&outcome), Some(AvocadoMultisigError::invalid_params()));
    assert_eq!(fx.avo_nonce()?, U256::ZERO);
    Ok(())
}
