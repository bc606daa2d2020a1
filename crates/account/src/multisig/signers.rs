use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use tracing::{trace, warn};

use super::{AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig, best_effort::BestEffort};
use avocado_contracts::IAvoSignersList;
use crate::{
    constants::{MAX_SIGNERS_COUNT, SIGNERS_LIST_SYNC_GAS},
    error::Result,
    multisig::self_action,
    storage::slots::{REQUIRED_SIGNERS, SIGNERS_COUNT, SIGNERS_HEAD, SIGNERS_NEXT, SIGNERS_TAIL},
};

use IAvocadoMultisig::Action;

impl AvocadoMultisig<'_> {
    /// Ascending signer list. The owner alone when no other signers are configured.
    pub fn signers(&mut self) -> Result<Vec<Address>> {
        let count = self.read(SIGNERS_COUNT)?;
        if count.is_zero() {
            return Ok(vec![self.owner()?]);
        }

        let count: usize = count.saturating_to();
        let mut signers = Vec::with_capacity(count);
        let mut current = self.read(SIGNERS_HEAD)?;
        while signers.len() < count && current != SIGNERS_TAIL && !current.is_zero() {
            signers.push(current);
            current = self.read(SIGNERS_NEXT.at(current))?;
        }
        Ok(signers)
    }

    pub fn signers_count(&mut self) -> Result<U256> {
        let count = self.read(SIGNERS_COUNT)?;
        Ok(if count.is_zero() { U256::from(1) } else { count })
    }

    /// Membership is derived from the traversed list only, so stray `next` words written outside
    /// of it never grant signing rights.
    pub fn is_signer(&mut self, signer: Address) -> Result<bool> {
        if signer.is_zero() {
            return Ok(false);
        }
        Ok(self.signers()?.binary_search(&signer).is_ok())
    }

    pub fn add_signers(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::addSignersCall,
    ) -> Result<()> {
        self.check_self(sender)?;
        self.add_signers_internal(&call.addSigners, call.requiredSigners)
    }

    pub fn remove_signers(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::removeSignersCall,
    ) -> Result<()> {
        self.check_self(sender)?;
        self.remove_signers_internal(&call.removeSigners, call.requiredSigners)
    }

    pub fn set_required_signers(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::setRequiredSignersCall,
    ) -> Result<()> {
        self.check_self(sender)?;
        let count = self.signers_count()?.saturating_to();
        self.set_required_signers_internal(call.requiredSigners, count)
    }

    pub(crate) fn add_signers_internal(&mut self, additions: &[Address], required: u8) -> Result<()> {
        let current = self.signers()?;
        let merged = merge_signers(&current, additions)?;
        check_required(required, merged.len())?;

        self.store_signers(&current, &merged)?;
        for signer in additions {
            self.emit(IAvocadoMultisig::SignerAdded { signer: *signer })?;
        }
        self.set_required_signers_internal(required, merged.len())?;

        trace!(account = %self.address, added = additions.len(), count = merged.len(), "signers added");
        self.sync_signers_list(additions, SignerSync::Added)
    }

    pub(crate) fn remove_signers_internal(
        &mut self,
        removals: &[Address],
        required: u8,
    ) -> Result<()> {
        let owner = self.owner()?;
        let current = self.signers()?;
        let remaining = exclude_signers(&current, removals, owner)?;
        check_required(required, remaining.len())?;

        self.store_signers(&current, &remaining)?;
        for signer in removals {
            self.emit(IAvocadoMultisig::SignerRemoved { signer: *signer })?;
        }
        self.set_required_signers_internal(required, remaining.len())?;

        trace!(account = %self.address, removed = removals.len(), count = remaining.len(), "signers removed");
        self.sync_signers_list(removals, SignerSync::Removed)
    }

    fn set_required_signers_internal(&mut self, required: u8, signers_count: usize) -> Result<()> {
        check_required(required, signers_count)?;
        if self.read(REQUIRED_SIGNERS)? == required {
            return Ok(());
        }

        self.write(REQUIRED_SIGNERS, required)?;
        self.emit(IAvocadoMultisig::RequiredSignersSet {
            requiredSigners: required,
        })
    }

    /// Rewrites the stored linked list from `old` to `new`.
    ///
    /// A list of just the owner is stored as the empty list so the slots are reclaimed.
    fn store_signers(&mut self, old: &[Address], new: &[Address]) -> Result<()> {
        let stored: &[Address] = if new.len() <= 1 { &[] } else { new };

        for signer in old {
            if stored.binary_search(signer).is_err() {
                self.write(SIGNERS_NEXT.at(*signer), Address::ZERO)?;
            }
        }

        for (position, signer) in stored.iter().enumerate() {
            let next = stored.get(position + 1).copied().unwrap_or(SIGNERS_TAIL);
            self.write(SIGNERS_NEXT.at(*signer), next)?;
        }
        self.write(SIGNERS_HEAD, stored.first().copied().unwrap_or(Address::ZERO))?;
        self.write(SIGNERS_COUNT, U256::from(stored.len()))
    }

    /// Notifies the signers list of every changed signer. Failures never revert the change; one
    /// `ListSyncFailed` is emitted for the whole batch instead.
    fn sync_signers_list(&mut self, signers: &[Address], sync: SignerSync) -> Result<()> {
        let list = self.config.signers_list;
        if list.is_zero() {
            return Ok(());
        }

        let mut failed = false;
        for signer in signers {
            let input = match sync {
                SignerSync::Added => IAvoSignersList::notifySignerAddedCall {
                    avocado: self.address,
                    signer: *signer,
                }
                .abi_encode(),
                SignerSync::Removed => IAvoSignersList::notifySignerRemovedCall {
                    avocado: self.address,
                    signer: *signer,
                }
                .abi_encode(),
            };
            if let BestEffort::Failed { reason } =
                self.best_effort_call(list, U256::ZERO, input.into(), SIGNERS_LIST_SYNC_GAS)?
            {
                warn!(account = %self.address, %signer, ?sync, %reason, "signers list sync failed");
                failed = true;
            }
        }

        if failed {
            self.emit(IAvocadoMultisig::ListSyncFailed {})?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignerSync {
    Added,
    Removed,
}

fn check_required(required: u8, signers_count: usize) -> std::result::Result<(), AvocadoMultisigError> {
    if required == 0 || required as usize > signers_count {
        return Err(AvocadoMultisigError::invalid_params());
    }
    Ok(())
}

/// Merges strictly ascending `additions` into the ascending `current` list.
pub(crate) fn merge_signers(
    current: &[Address],
    additions: &[Address],
) -> std::result::Result<Vec<Address>, AvocadoMultisigError> {
    // Ascending input, so checking the first entry excludes zero and the list terminator.
    if additions.is_empty() || !is_strictly_ascending(additions) || additions[0] <= SIGNERS_TAIL {
        return Err(AvocadoMultisigError::invalid_params());
    }
    if current.len() + additions.len() > MAX_SIGNERS_COUNT {
        return Err(AvocadoMultisigError::invalid_params());
    }

    let mut merged = Vec::with_capacity(current.len() + additions.len());
    let (mut i, mut j) = (0, 0);
    while i < current.len() && j < additions.len() {
        match current[i].cmp(&additions[j]) {
            std::cmp::Ordering::Less => {
                merged.push(current[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(additions[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => return Err(AvocadoMultisigError::invalid_params()),
        }
    }
    merged.extend_from_slice(&current[i..]);
    merged.extend_from_slice(&additions[j..]);
    Ok(merged)
}

/// Removes strictly ascending `removals` from `current`. The owner can never be removed.
pub(crate) fn exclude_signers(
    current: &[Address],
    removals: &[Address],
    owner: Address,
) -> std::result::Result<Vec<Address>, AvocadoMultisigError> {
    if removals.is_empty() || !is_strictly_ascending(removals) {
        return Err(AvocadoMultisigError::invalid_params());
    }

    let mut remaining = Vec::with_capacity(current.len());
    let mut removals = removals.iter().peekable();
    for signer in current {
        if removals.peek() == Some(&signer) {
            if *signer == owner {
                return Err(AvocadoMultisigError::invalid_params());
            }
            removals.next();
        } else {
            remaining.push(*signer);
        }
    }

    // Anything left over was not a signer.
    if removals.next().is_some() {
        return Err(AvocadoMultisigError::invalid_params());
    }
    Ok(remaining)
}

fn is_strictly_ascending(addresses: &[Address]) -> bool {
    addresses.windows(2).all(|w| w[0] < w[1])
}

/// Builds a self-call action adding `signers` and setting the quorum to `required`.
pub fn add_signers_action(account: Address, signers: Vec<Address>, required: u8) -> Action {
    self_action(
        account,
        IAvocadoMultisig::addSignersCall {
            addSigners: signers,
            requiredSigners: required,
        }
        .abi_encode()
        .into(),
    )
}

/// Builds a self-call action removing `signers` and setting the quorum to `required`.
pub fn remove_signers_action(account: Address, signers: Vec<Address>, required: u8) -> Action {
    self_action(
        account,
        IAvocadoMultisig::removeSignersCall {
            removeSigners: signers,
            requiredSigners: required,
        }
        .abi_encode()
        .into(),
    )
}

pub fn set_required_signers_action(account: Address, required: u8) -> Action {
    self_action(
        account,
        IAvocadoMultisig::setRequiredSignersCall {
            requiredSigners: required,
        }
        .abi_encode()
        .into(),
    )
}
