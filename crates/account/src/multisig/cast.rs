//! Cast entry points: verify, consume the nonce, run the actions, settle.

use alloy_primitives::{Address, B256, U256};
use tracing::{debug, trace};

use super::{
    AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig, guard::CastGuard, nonces::NonceMode,
};
use crate::{
    constants::{CAST_EVENTS_RESERVE_GAS, DEAD_ADDRESS, FEE_RESERVE_GAS},
    error::Result,
};

use IAvocadoMultisig::{
    CastAuthorizedParams, CastChainAgnosticParams, CastForwardParams, CastParams,
    ChainAgnosticHash, SignatureParams,
};

/// Result of a cast that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastOutcome {
    pub success: bool,
    /// Empty on success.
    pub revert_reason: String,
}

/// How signature verification failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignaturePolicy {
    Strict,
    /// Failures surface as `InvalidParams`, like every other chain-agnostic mismatch.
    ChainAgnostic,
    /// Failures are tolerated and the claimed signers are used. Gas is still spent on the
    /// checks so estimates stay faithful.
    Simulate,
}

impl SignaturePolicy {
    fn new(simulate: bool, chain_agnostic: bool) -> Self {
        match (simulate, chain_agnostic) {
            (true, _) => Self::Simulate,
            (false, true) => Self::ChainAgnostic,
            (false, false) => Self::Strict,
        }
    }
}

impl AvocadoMultisig<'_> {
    /// Relayed cast, pinned to the live chain. Only a registered forwarder may call it.
    pub fn cast(
        &mut self,
        sender: Address,
        params: &CastParams,
        forward_params: &CastForwardParams,
        signatures: &[SignatureParams],
        simulate: bool,
    ) -> Result<CastOutcome> {
        self.check_simulation(simulate)?;
        self.check_forwarder(sender, simulate)?;
        let mut account = CastGuard::enter(self)?;
        account.check_gas_sent(forward_params.gas)?;

        let digest = account.get_sig_digest(params, forward_params);
        let (nonce, signers) = account.verify_request(
            digest,
            params,
            forward_params.validAfter,
            forward_params.validUntil,
            signatures,
            SignaturePolicy::new(simulate, false),
        )?;

        account.consume_nonce(nonce)?;
        account.execute_cast(sender, params, signers, CAST_EVENTS_RESERVE_GAS)
    }

    /// Cast submitted by one of the signers, paying its fee from the account balance.
    pub fn cast_authorized(
        &mut self,
        sender: Address,
        params: &CastParams,
        authorized_params: &CastAuthorizedParams,
        signatures: &[SignatureParams],
        simulate: bool,
    ) -> Result<CastOutcome> {
        let gas_start = self.host.gas_left();
        self.check_simulation(simulate)?;
        if !(simulate && sender == DEAD_ADDRESS) && !self.is_signer(sender)? {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        let mut account = CastGuard::enter(self)?;

        if !authorized_params.gasLimit.is_zero() {
            account.check_gas_sent(authorized_params.gasLimit)?;
        }
        if !authorized_params.gasPrice.is_zero()
            && account.host.gas_price() > authorized_params.gasPrice
        {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        let digest = account.get_sig_digest_authorized(params, authorized_params);
        let (nonce, signers) = account.verify_request(
            digest,
            params,
            authorized_params.validAfter,
            authorized_params.validUntil,
            signatures,
            SignaturePolicy::new(simulate, false),
        )?;

        // The fee cap is enforced before anything runs: against the quote for the signed gas
        // limit, or against the floor every fee is clamped to when no limit was signed.
        let estimate = if authorized_params.gasLimit.is_zero() {
            account.config().clamp_authorized_fee(U256::ZERO)
        } else {
            account.quote_fee(authorized_params.gasLimit)?.fee
        };
        account.check_max_fee(estimate, authorized_params.maxFee)?;

        account.consume_nonce(nonce)?;
        let outcome = account.execute_cast(
            sender,
            params,
            signers,
            CAST_EVENTS_RESERVE_GAS + FEE_RESERVE_GAS,
        )?;

        let gas_used = U256::from(gas_start.saturating_sub(account.host.gas_left()));
        let quote = account.quote_fee(gas_used)?;
        account.check_max_fee(quote.fee, authorized_params.maxFee)?;
        account.pay_fee(quote)?;
        Ok(outcome)
    }

    /// Relayed execution of this chain's portion of a chain-agnostic cast.
    pub fn cast_chain_agnostic(
        &mut self,
        sender: Address,
        params: &CastChainAgnosticParams,
        signatures: &[SignatureParams],
        hashes: &[ChainAgnosticHash],
        simulate: bool,
    ) -> Result<CastOutcome> {
        self.check_simulation(simulate)?;
        self.check_forwarder(sender, simulate)?;
        let mut account = CastGuard::enter(self)?;
        account.check_gas_sent(params.forwardParams.gas)?;

        let digest = account.validate_chain_agnostic(params, hashes)?;
        let (nonce, signers) = account.verify_request(
            digest,
            &params.params,
            params.forwardParams.validAfter,
            params.forwardParams.validUntil,
            signatures,
            SignaturePolicy::new(simulate, true),
        )?;

        account.consume_nonce(nonce)?;
        account.execute_cast(sender, &params.params, signers, CAST_EVENTS_RESERVE_GAS)
    }

    /// Runs every check of [`Self::cast`] without executing anything.
    pub fn verify(
        &mut self,
        params: &CastParams,
        forward_params: &CastForwardParams,
        signatures: &[SignatureParams],
    ) -> Result<bool> {
        let digest = self.get_sig_digest(params, forward_params);
        self.verify_request(
            digest,
            params,
            forward_params.validAfter,
            forward_params.validUntil,
            signatures,
            SignaturePolicy::Strict,
        )?;
        Ok(true)
    }

    pub fn verify_authorized(
        &mut self,
        params: &CastParams,
        authorized_params: &CastAuthorizedParams,
        signatures: &[SignatureParams],
    ) -> Result<bool> {
        let digest = self.get_sig_digest_authorized(params, authorized_params);
        self.verify_request(
            digest,
            params,
            authorized_params.validAfter,
            authorized_params.validUntil,
            signatures,
            SignaturePolicy::Strict,
        )?;
        Ok(true)
    }

    pub fn verify_chain_agnostic(
        &mut self,
        params: &CastChainAgnosticParams,
        signatures: &[SignatureParams],
        hashes: &[ChainAgnosticHash],
    ) -> Result<bool> {
        let digest = self.validate_chain_agnostic(params, hashes)?;
        self.verify_request(
            digest,
            &params.params,
            params.forwardParams.validAfter,
            params.forwardParams.validUntil,
            signatures,
            SignaturePolicy::ChainAgnostic,
        )?;
        Ok(true)
    }

    /// Simulations only run in transactions originating from the dead address.
    fn check_simulation(&self, simulate: bool) -> Result<()> {
        if simulate && self.host.tx_origin() != DEAD_ADDRESS {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        Ok(())
    }

    fn check_forwarder(&mut self, sender: Address, simulate: bool) -> Result<()> {
        if simulate && sender == DEAD_ADDRESS {
            return Ok(());
        }
        if !self.is_valid_forwarder(sender)? {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        Ok(())
    }

    /// The relayer must have forwarded at least the gas the signers asked for.
    fn check_gas_sent(&self, required: U256) -> Result<()> {
        if U256::from(self.host.gas_left()) < required {
            return Err(AvocadoMultisigError::insufficient_gas_sent().into());
        }
        Ok(())
    }

    /// Structural, timing, nonce and signature checks, in that order. Nothing is consumed.
    fn verify_request(
        &mut self,
        digest: B256,
        params: &CastParams,
        valid_after: U256,
        valid_until: U256,
        signatures: &[SignatureParams],
        policy: SignaturePolicy,
    ) -> Result<(NonceMode, Vec<Address>)> {
        if params.actions.is_empty() {
            return Err(AvocadoMultisigError::invalid_params().into());
        }
        self.validate_timing(valid_after, valid_until)?;
        let nonce = self.validate_nonce(params.avoNonce, digest)?;

        let signers = match (self.verify_signatures(digest, signatures), policy) {
            (Ok(signers), _) => signers,
            (Err(err), SignaturePolicy::ChainAgnostic)
                if err.as_multisig() == Some(&AvocadoMultisigError::invalid_signature()) =>
            {
                return Err(AvocadoMultisigError::invalid_params().into());
            }
            (Err(err), SignaturePolicy::Simulate) if err.as_multisig().is_some() => {
                trace!(account = %self.address, %err, "ignoring signature failure in simulation");
                signatures.iter().map(|s| s.signer).collect()
            }
            (Err(err), _) => return Err(err),
        };

        trace!(account = %self.address, %digest, ?nonce, "cast verified");
        Ok((nonce, signers))
    }

    fn execute_cast(
        &mut self,
        sender: Address,
        params: &CastParams,
        signers: Vec<Address>,
        reserve_gas: u64,
    ) -> Result<CastOutcome> {
        match self.execute_actions(&params.actions, params.id, reserve_gas)? {
            None => {
                self.emit(IAvocadoMultisig::CastExecuted {
                    source: params.source,
                    caller: sender,
                    signers,
                    metadata: params.metadata.clone(),
                })?;
                Ok(CastOutcome {
                    success: true,
                    revert_reason: String::new(),
                })
            }
            Some(reason) => {
                debug!(account = %self.address, %sender, %reason, "cast failed");
                self.emit(IAvocadoMultisig::CastFailed {
                    source: params.source,
                    caller: sender,
                    signers,
                    reason: reason.clone(),
                    metadata: params.metadata.clone(),
                })?;
                Ok(CastOutcome {
                    success: false,
                    revert_reason: reason,
                })
            }
        }
    }
}
