//! EIP-712 digests of the three cast modes.
//!
//! Standard and authorized casts are signed over a domain pinned to [`DEFAULT_CHAIN_ID`] whose
//! salt commits to the live chain id, so a signature is only valid on the chain it was made for.
//! Chain-agnostic casts are signed over a domain whose salt also commits to
//! [`DEFAULT_CHAIN_ID`]: the same digest is reproduced on every chain, and the per-chain binding
//! moves into the `chainId` of each committed [`ChainAgnosticHash`].

use alloy_primitives::{Address, B256, U256, keccak256};
use alloy_sol_types::{Eip712Domain, SolStruct};

use super::{AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig};
use crate::constants::{DEFAULT_CHAIN_ID, DOMAIN_SEPARATOR_NAME, DOMAIN_SEPARATOR_VERSION};

use IAvocadoMultisig::{
    Cast, CastAuthorized, CastAuthorizedParams, CastChainAgnostic, CastChainAgnosticParams,
    CastForwardParams, CastParams, ChainAgnosticHash,
};

fn chain_salt(chain_id: u64) -> B256 {
    keccak256(U256::from(chain_id).to_be_bytes::<32>())
}

fn avocado_domain(account: Address, salt: B256) -> Eip712Domain {
    Eip712Domain::new(
        Some(DOMAIN_SEPARATOR_NAME.into()),
        Some(DOMAIN_SEPARATOR_VERSION.into()),
        Some(U256::from(DEFAULT_CHAIN_ID)),
        Some(account),
        Some(salt),
    )
}

/// Domain of standard and authorized casts of `account` on chain `live_chain_id`.
pub fn domain(account: Address, live_chain_id: u64) -> Eip712Domain {
    avocado_domain(account, chain_salt(live_chain_id))
}

/// Domain of chain-agnostic casts of `account`. Identical on every chain.
pub fn chain_agnostic_domain(account: Address) -> Eip712Domain {
    avocado_domain(account, chain_salt(DEFAULT_CHAIN_ID))
}

pub fn cast_digest(
    account: Address,
    live_chain_id: u64,
    params: &CastParams,
    forward_params: &CastForwardParams,
) -> B256 {
    Cast {
        params: params.clone(),
        forwardParams: forward_params.clone(),
    }
    .eip712_signing_hash(&domain(account, live_chain_id))
}

pub fn cast_authorized_digest(
    account: Address,
    live_chain_id: u64,
    params: &CastParams,
    authorized_params: &CastAuthorizedParams,
) -> B256 {
    CastAuthorized {
        params: params.clone(),
        authorizedParams: authorized_params.clone(),
    }
    .eip712_signing_hash(&domain(account, live_chain_id))
}

/// Commitment to one chain's portion. A `chainId` of 0 is resolved to `live_chain_id` first.
pub fn chain_agnostic_hash(params: &CastChainAgnosticParams, live_chain_id: u64) -> ChainAgnosticHash {
    let mut resolved = params.clone();
    if resolved.chainId.is_zero() {
        resolved.chainId = U256::from(live_chain_id);
    }
    ChainAgnosticHash {
        hash: resolved.eip712_hash_struct(),
        chainId: resolved.chainId,
    }
}

/// Commitments of every portion, ordered by chain id.
///
/// Fails with `InvalidParams` for fewer than two portions or two portions on the same chain.
pub fn chain_agnostic_hashes(
    params: &[CastChainAgnosticParams],
    live_chain_id: u64,
) -> Result<Vec<ChainAgnosticHash>, AvocadoMultisigError> {
    let mut hashes: Vec<_> = params
        .iter()
        .map(|p| chain_agnostic_hash(p, live_chain_id))
        .collect();
    hashes.sort_by(|a, b| a.chainId.cmp(&b.chainId));
    check_hashes(&hashes)?;
    Ok(hashes)
}

/// Aggregate digest signed for a chain-agnostic cast.
///
/// `hashes` must hold at least two entries in strictly ascending chain id order.
pub fn chain_agnostic_digest(
    account: Address,
    hashes: &[ChainAgnosticHash],
) -> Result<B256, AvocadoMultisigError> {
    check_hashes(hashes)?;
    Ok(CastChainAgnostic {
        hashes: hashes.to_vec(),
    }
    .eip712_signing_hash(&chain_agnostic_domain(account)))
}

fn check_hashes(hashes: &[ChainAgnosticHash]) -> Result<(), AvocadoMultisigError> {
    if hashes.len() < 2 || !hashes.windows(2).all(|w| w[0].chainId < w[1].chainId) {
        return Err(AvocadoMultisigError::invalid_params());
    }
    Ok(())
}

impl AvocadoMultisig<'_> {
    fn live_chain_id(&self) -> u64 {
        self.host.chain_id()
    }

    pub fn domain_separator_v4(&self) -> B256 {
        domain(self.address, self.live_chain_id()).separator()
    }

    pub fn domain_separator_v4_chain_agnostic(&self) -> B256 {
        chain_agnostic_domain(self.address).separator()
    }

    pub fn get_sig_digest(&self, params: &CastParams, forward_params: &CastForwardParams) -> B256 {
        cast_digest(self.address, self.live_chain_id(), params, forward_params)
    }

    pub fn get_sig_digest_authorized(
        &self,
        params: &CastParams,
        authorized_params: &CastAuthorizedParams,
    ) -> B256 {
        cast_authorized_digest(self.address, self.live_chain_id(), params, authorized_params)
    }

    pub fn get_chain_agnostic_hashes(
        &self,
        params: &[CastChainAgnosticParams],
    ) -> Result<Vec<ChainAgnosticHash>, AvocadoMultisigError> {
        chain_agnostic_hashes(params, self.live_chain_id())
    }

    pub fn get_sig_digest_chain_agnostic(
        &self,
        params: &[CastChainAgnosticParams],
    ) -> Result<B256, AvocadoMultisigError> {
        let hashes = self.get_chain_agnostic_hashes(params)?;
        chain_agnostic_digest(self.address, &hashes)
    }

    pub fn get_sig_digest_chain_agnostic_from_hashes(
        &self,
        hashes: &[ChainAgnosticHash],
    ) -> Result<B256, AvocadoMultisigError> {
        chain_agnostic_digest(self.address, hashes)
    }

    /// Cross-checks the executed portion against the supplied commitments and returns the
    /// aggregate digest the signers must have signed.
    ///
    /// The portion must target the live chain and its recomputed commitment must be the one
    /// listed for the live chain. Commitments of other chains are taken as given.
    pub(crate) fn validate_chain_agnostic(
        &self,
        params: &CastChainAgnosticParams,
        hashes: &[ChainAgnosticHash],
    ) -> Result<B256, AvocadoMultisigError> {
        let live = U256::from(self.live_chain_id());
        if !params.chainId.is_zero() && params.chainId != live {
            return Err(AvocadoMultisigError::invalid_params());
        }

        let local = chain_agnostic_hash(params, self.live_chain_id());
        let listed = hashes.iter().find(|h| h.chainId == live);
        if listed != Some(&local) {
            return Err(AvocadoMultisigError::invalid_params());
        }

        chain_agnostic_digest(self.address, hashes)
    }
}
