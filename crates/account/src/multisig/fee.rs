use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use avocado_contracts::{
    FEE_MODE_ABSOLUTE, FEE_MODE_PERCENTAGE, FEE_PERCENTAGE_DENOMINATOR, IAvoRegistry,
};
use tracing::{debug, trace, warn};

use super::{AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig, best_effort::BestEffort};
use crate::{
    constants::{FEE_REGISTRY_GAS_STIPEND, FEE_TRANSFER_GAS},
    error::Result,
    host::CallInputs,
};

/// Fee owed by an authorized cast and its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FeeQuote {
    pub(crate) fee: U256,
    pub(crate) collector: Address,
}

impl AvocadoMultisig<'_> {
    /// Quotes the fee of an authorized cast that used `gas_used` gas.
    ///
    /// The registry's answer is only trusted when it returns exactly one well-formed
    /// `(fee, collector, mode)` within the gas stipend; otherwise the configured minimum fee is
    /// paid to the configured collector. The result is always clamped to the configured bounds.
    pub(crate) fn quote_fee(&mut self, gas_used: U256) -> Result<FeeQuote> {
        let gas_price = self.host.gas_price();
        let quote = match self.registry_fee(gas_used, gas_price)? {
            Some(quote) => quote,
            None => {
                debug!(account = %self.address, %gas_used, "registry fee unavailable, using fallback fee");
                FeeQuote {
                    fee: self.config.authorized_min_fee,
                    collector: self.config.authorized_fee_collector,
                }
            }
        };

        let fee = self.config.clamp_authorized_fee(quote.fee);
        trace!(account = %self.address, %gas_used, %fee, collector = %quote.collector, "fee computed");
        Ok(FeeQuote { fee, ..quote })
    }

    fn registry_fee(&mut self, gas_used: U256, gas_price: U256) -> Result<Option<FeeQuote>> {
        let query = IAvoRegistry::calcFeeCall {
            gasUsed: gas_used,
            gasPrice: gas_price,
        };
        let outcome = self.host.call(CallInputs::static_call(
            self.address,
            self.config.registry,
            query.abi_encode().into(),
            FEE_REGISTRY_GAS_STIPEND,
        ))?;
        if !outcome.success || outcome.output.len() != 96 {
            return Ok(None);
        }
        let Ok(ret) = IAvoRegistry::calcFeeCall::abi_decode_returns(&outcome.output) else {
            return Ok(None);
        };
        if ret.feeCollector.is_zero() {
            return Ok(None);
        }

        let fee = match ret.mode {
            FEE_MODE_PERCENTAGE => gas_used
                .saturating_mul(gas_price)
                .saturating_mul(ret.fee)
                / U256::from(FEE_PERCENTAGE_DENOMINATOR),
            FEE_MODE_ABSOLUTE => ret.fee,
            _ => return Ok(None),
        };
        Ok(Some(FeeQuote {
            fee,
            collector: ret.feeCollector,
        }))
    }

    /// `max_fee` of zero means the signers did not cap the fee.
    pub(crate) fn check_max_fee(&self, fee: U256, max_fee: U256) -> Result<()> {
        if !max_fee.is_zero() && fee > max_fee {
            return Err(AvocadoMultisigError::max_fee(fee, max_fee).into());
        }
        Ok(())
    }

    /// Transfers the fee. A collector that rejects it does not revert the cast.
    pub(crate) fn pay_fee(&mut self, quote: FeeQuote) -> Result<()> {
        if quote.fee.is_zero() {
            return Ok(());
        }
        if self.host.balance(self.address)? < quote.fee {
            return Err(AvocadoMultisigError::insufficient_balance(quote.fee).into());
        }

        match self.best_effort_call(quote.collector, quote.fee, Bytes::new(), FEE_TRANSFER_GAS)? {
            BestEffort::Done => self.emit(IAvocadoMultisig::FeePaid { fee: quote.fee }),
            BestEffort::Failed { reason } => {
                warn!(account = %self.address, fee = %quote.fee, collector = %quote.collector, %reason, "fee transfer failed");
                self.emit(IAvocadoMultisig::FeePayFailed { fee: quote.fee })
            }
        }
    }
}
