use alloy_primitives::Bytes;
use alloy_sol_types::SolInterface;

use super::{AvocadoMultisig, IAvocadoMultisig, IAvocadoMultisig::IAvocadoMultisigCalls};
use crate::{
    config::AvocadoConfig,
    constants::{DOMAIN_SEPARATOR_NAME, DOMAIN_SEPARATOR_VERSION},
    dispatch::{dispatch_call, input_cost, mutate, mutate_void, view},
    error::Result,
    host::{Frame, Host, Program},
};

/// One deployed version of the account logic.
///
/// Proxies delegate-call into it, so every frame it runs in operates on the calling account's
/// storage and balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvocadoMultisigLogic {
    config: AvocadoConfig,
}

impl AvocadoMultisigLogic {
    pub fn new(config: AvocadoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AvocadoConfig {
        &self.config
    }
}

impl Program for AvocadoMultisigLogic {
    fn execute(&self, host: &mut dyn Host, frame: &Frame) -> Result<Bytes> {
        // Plain value transfer.
        if frame.input.is_empty() {
            return Ok(Bytes::new());
        }
        host.deduct_gas(input_cost(frame.input.len()))?;

        let sender = frame.caller;
        let mut account = AvocadoMultisig::new(frame.address, host, &self.config);

        dispatch_call(&frame.input, IAvocadoMultisigCalls::abi_decode, |call| match call {
            IAvocadoMultisigCalls::cast(call) => mutate(call, sender, |s, c| {
                account
                    .cast(s, &c.params, &c.forwardParams, &c.signaturesParams, false)
                    .map(|o| IAvocadoMultisig::castReturn {
                        success: o.success,
                        revertReason: o.revert_reason,
                    })
            }),
            IAvocadoMultisigCalls::simulateCast(call) => mutate(call, sender, |s, c| {
                account
                    .cast(s, &c.params, &c.forwardParams, &c.signaturesParams, true)
                    .map(|o| IAvocadoMultisig::simulateCastReturn {
                        success: o.success,
                        revertReason: o.revert_reason,
                    })
            }),
            IAvocadoMultisigCalls::castAuthorized(call) => mutate(call, sender, |s, c| {
                account
                    .cast_authorized(s, &c.params, &c.authorizedParams, &c.signaturesParams, false)
                    .map(|o| IAvocadoMultisig::castAuthorizedReturn {
                        success: o.success,
                        revertReason: o.revert_reason,
                    })
            }),
            IAvocadoMultisigCalls::simulateCastAuthorized(call) => mutate(call, sender, |s, c| {
                account
                    .cast_authorized(s, &c.params, &c.authorizedParams, &c.signaturesParams, true)
                    .map(|o| IAvocadoMultisig::simulateCastAuthorizedReturn {
                        success: o.success,
                        revertReason: o.revert_reason,
                    })
            }),
            IAvocadoMultisigCalls::castChainAgnostic(call) => mutate(call, sender, |s, c| {
                account
                    .cast_chain_agnostic(
                        s,
                        &c.params,
                        &c.signaturesParams,
                        &c.chainAgnosticHashes,
                        false,
                    )
                    .map(|o| IAvocadoMultisig::castChainAgnosticReturn {
                        success: o.success,
                        revertReason: o.revert_reason,
                    })
            }),
            IAvocadoMultisigCalls::simulateCastChainAgnostic(call) => {
                mutate(call, sender, |s, c| {
                    account
                        .cast_chain_agnostic(
                            s,
                            &c.params,
                            &c.signaturesParams,
                            &c.chainAgnosticHashes,
                            true,
                        )
                        .map(|o| IAvocadoMultisig::simulateCastChainAgnosticReturn {
                            success: o.success,
                            revertReason: o.revert_reason,
                        })
                })
            }

            IAvocadoMultisigCalls::verify(call) => view(call, |c| {
                account.verify(&c.params, &c.forwardParams, &c.signaturesParams)
            }),
            IAvocadoMultisigCalls::verifyAuthorized(call) => view(call, |c| {
                account.verify_authorized(&c.params, &c.authorizedParams, &c.signaturesParams)
            }),
            IAvocadoMultisigCalls::verifyChainAgnostic(call) => view(call, |c| {
                account.verify_chain_agnostic(&c.params, &c.signaturesParams, &c.chainAgnosticHashes)
            }),

            IAvocadoMultisigCalls::getSigDigest(call) => {
                view(call, |c| Ok(account.get_sig_digest(&c.params, &c.forwardParams)))
            }
            IAvocadoMultisigCalls::getSigDigestAuthorized(call) => view(call, |c| {
                Ok(account.get_sig_digest_authorized(&c.params, &c.authorizedParams))
            }),
            IAvocadoMultisigCalls::getSigDigestChainAgnostic(call) => view(call, |c| {
                Ok(account.get_sig_digest_chain_agnostic(&c.params)?)
            }),
            IAvocadoMultisigCalls::getSigDigestChainAgnosticFromHashes(call) => view(call, |c| {
                Ok(account.get_sig_digest_chain_agnostic_from_hashes(&c.chainAgnosticHashes)?)
            }),
            IAvocadoMultisigCalls::getChainAgnosticHashes(call) => view(call, |c| {
                Ok(account.get_chain_agnostic_hashes(&c.params)?)
            }),
            IAvocadoMultisigCalls::domainSeparatorV4(call) => {
                view(call, |_| Ok(account.domain_separator_v4()))
            }
            IAvocadoMultisigCalls::domainSeparatorV4ChainAgnostic(call) => {
                view(call, |_| Ok(account.domain_separator_v4_chain_agnostic()))
            }
            IAvocadoMultisigCalls::DOMAIN_SEPARATOR_NAME(call) => {
                view(call, |_| Ok(DOMAIN_SEPARATOR_NAME.to_string()))
            }
            IAvocadoMultisigCalls::DOMAIN_SEPARATOR_VERSION(call) => {
                view(call, |_| Ok(DOMAIN_SEPARATOR_VERSION.to_string()))
            }

            IAvocadoMultisigCalls::initialize(call) => {
                mutate_void(call, sender, |s, c| account.initialize(s, c))
            }
            IAvocadoMultisigCalls::upgradeTo(call) => {
                mutate_void(call, sender, |s, c| account.upgrade_to(s, c))
            }
            IAvocadoMultisigCalls::addSigners(call) => {
                mutate_void(call, sender, |s, c| account.add_signers(s, c))
            }
            IAvocadoMultisigCalls::removeSigners(call) => {
                mutate_void(call, sender, |s, c| account.remove_signers(s, c))
            }
            IAvocadoMultisigCalls::setRequiredSigners(call) => {
                mutate_void(call, sender, |s, c| account.set_required_signers(s, c))
            }
            IAvocadoMultisigCalls::occupyAvoNonces(call) => {
                mutate_void(call, sender, |s, c| account.occupy_avo_nonces(s, c))
            }
            IAvocadoMultisigCalls::occupyNonSequentialNonces(call) => {
                mutate_void(call, sender, |s, c| account.occupy_non_sequential_nonces(s, c))
            }

            IAvocadoMultisigCalls::owner(call) => view(call, |_| account.owner()),
            IAvocadoMultisigCalls::index(call) => view(call, |_| account.index()),
            IAvocadoMultisigCalls::implementation(call) => {
                view(call, |_| account.implementation())
            }
            IAvocadoMultisigCalls::requiredSigners(call) => {
                view(call, |_| account.required_signers())
            }
            IAvocadoMultisigCalls::signersCount(call) => view(call, |_| account.signers_count()),
            IAvocadoMultisigCalls::signers(call) => view(call, |_| account.signers()),
            IAvocadoMultisigCalls::isSigner(call) => view(call, |c| account.is_signer(c.signer)),
            IAvocadoMultisigCalls::avoNonce(call) => view(call, |_| account.avo_nonce()),
            IAvocadoMultisigCalls::nonSequentialNonces(call) => {
                view(call, |c| account.non_sequential_nonce_used(c.nonce))
            }
        })
    }
}
