use alloy_primitives::{FixedBytes, fixed_bytes};

crate::sol! {
    /// Contract signature validation, as defined by EIP-1271.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes calldata signature)
            external
            view
            returns (bytes4 magicValue);
    }
}

/// Return value of a successful `isValidSignature` check.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> = fixed_bytes!("0x1626ba7e");
