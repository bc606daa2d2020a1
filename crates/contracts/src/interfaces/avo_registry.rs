pub use IAvoRegistry::IAvoRegistryErrors as AvoRegistryError;

crate::sol! {
    /// Version and fee registry consulted by every Avocado account.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAvoRegistry {
        /// Whether `avoImpl` is an allowed logic version to upgrade to.
        function isValidImplementation(address avoImpl) external view returns (bool);

        /// Whether `avoForwarder` may call relayed cast entry points.
        function isValidForwarder(address avoForwarder) external view returns (bool);

        /// Fee for a cast that used `gasUsed` gas at `gasPrice`.
        ///
        /// `mode` 0 means `fee` is a percentage of `gasUsed * gasPrice` where 1e6 is 100%.
        /// `mode` 1 means `fee` is an absolute amount.
        function calcFee(uint256 gasUsed, uint256 gasPrice)
            external
            view
            returns (uint256 fee, address feeCollector, uint8 mode);

        error AvoRegistry__InvalidParams();
    }
}

/// Fee mode where the registry amount is a percentage of `gasUsed * gasPrice`.
pub const FEE_MODE_PERCENTAGE: u8 = 0;

/// Fee mode where the registry amount is charged as-is.
pub const FEE_MODE_ABSOLUTE: u8 = 1;

/// Denominator of [`FEE_MODE_PERCENTAGE`] amounts: 1e6 is 100%.
pub const FEE_PERCENTAGE_DENOMINATOR: u64 = 1_000_000;
