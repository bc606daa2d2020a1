pub mod slots;

use std::marker::PhantomData;

use alloy_primitives::{Address, B256, U256, keccak256};

use crate::{error::Result, host::Host};

/// A value that fits in one 32-byte storage word.
pub trait StorableValue: Sized {
    fn decode_word(word: U256) -> Self;
    fn encode_word(self) -> U256;
}

impl StorableValue for U256 {
    fn decode_word(word: U256) -> Self {
        word
    }

    fn encode_word(self) -> U256 {
        self
    }
}

impl StorableValue for Address {
    fn decode_word(word: U256) -> Self {
        Self::from_word(B256::from(word))
    }

    fn encode_word(self) -> U256 {
        U256::from_be_bytes(self.into_word().0)
    }
}

impl StorableValue for B256 {
    fn decode_word(word: U256) -> Self {
        Self::from(word)
    }

    fn encode_word(self) -> U256 {
        U256::from_be_bytes(self.0)
    }
}

impl StorableValue for bool {
    fn decode_word(word: U256) -> Self {
        !word.is_zero()
    }

    fn encode_word(self) -> U256 {
        U256::from(self as u8)
    }
}

impl StorableValue for u8 {
    fn decode_word(word: U256) -> Self {
        word.saturating_to()
    }

    fn encode_word(self) -> U256 {
        U256::from(self)
    }
}

impl StorableValue for u32 {
    fn decode_word(word: U256) -> Self {
        word.saturating_to()
    }

    fn encode_word(self) -> U256 {
        U256::from(self)
    }
}

/// Typed handle to one storage slot of the executing contract.
#[derive(Debug)]
pub struct Slot<T> {
    slot: U256,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T: StorableValue> Slot<T> {
    pub const fn new(slot: U256) -> Self {
        Self {
            slot,
            _ty: PhantomData,
        }
    }

    pub const fn slot(&self) -> U256 {
        self.slot
    }

    pub fn read(self, host: &mut dyn Host, address: Address) -> Result<T> {
        host.sload(address, self.slot).map(T::decode_word)
    }

    pub fn write(self, host: &mut dyn Host, address: Address, value: T) -> Result<()> {
        host.sstore(address, self.slot, value.encode_word())
    }
}

/// Solidity-style mapping rooted at a base slot. Entry slots are `keccak256(key . base)`.
#[derive(Debug)]
pub struct Mapping<K, V> {
    base: U256,
    _ty: PhantomData<fn(K) -> V>,
}

impl<K: StorableValue, V: StorableValue> Mapping<K, V> {
    pub const fn new(base: U256) -> Self {
        Self {
            base,
            _ty: PhantomData,
        }
    }

    pub fn at(&self, key: K) -> Slot<V> {
        Slot::new(mapping_slot(key.encode_word(), self.base))
    }
}

/// Storage slot of `key` in a mapping rooted at `base`.
pub fn mapping_slot(key: U256, base: U256) -> U256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&key.to_be_bytes::<32>());
    buf[32..].copy_from_slice(&base.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(buf).0)
}
