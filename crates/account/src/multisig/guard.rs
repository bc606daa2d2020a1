use std::ops::{Deref, DerefMut};

use alloy_primitives::U256;
use tracing::warn;

use super::{AvocadoMultisig, AvocadoMultisigError};
use crate::{error::Result, storage::slots::TRANSIENT_CAST_GUARD};

/// Scoped cast execution flag.
///
/// Entering fails if a cast of the same account is already running, so actions cannot re-enter
/// any cast entry point. While the guard lives, self-authorized functions accept self-calls. The
/// flag is cleared when the guard drops, on every exit path.
pub(crate) struct CastGuard<'g, 'a> {
    account: &'g mut AvocadoMultisig<'a>,
}

impl<'g, 'a> CastGuard<'g, 'a> {
    pub(crate) fn enter(account: &'g mut AvocadoMultisig<'a>) -> Result<Self> {
        if account.is_cast_active()? {
            return Err(AvocadoMultisigError::unauthorized().into());
        }
        account
            .host
            .tstore(account.address, TRANSIENT_CAST_GUARD, U256::from(1))?;
        Ok(Self { account })
    }
}

impl<'a> Deref for CastGuard<'_, 'a> {
    type Target = AvocadoMultisig<'a>;

    fn deref(&self) -> &Self::Target {
        self.account
    }
}

impl DerefMut for CastGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.account
    }
}

impl Drop for CastGuard<'_, '_> {
    fn drop(&mut self) {
        let address = self.account.address;
        if let Err(err) = self
            .account
            .host
            .tstore(address, TRANSIENT_CAST_GUARD, U256::ZERO)
        {
            // The enclosing frame fails as well and its rollback restores the flag.
            warn!(account = %address, %err, "failed to release cast guard");
        }
    }
}
