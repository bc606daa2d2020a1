pub use IAvoFactory::IAvoFactoryErrors as AvoFactoryError;

crate::sol! {
    /// Deterministic deployer of Avocado account proxies.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAvoFactory {
        function computeAvocado(address owner, uint32 index) external view returns (address);
        function currentImplementation() external view returns (address);
        function isAvocado(address avocado) external view returns (bool);

        function deploy(address owner, uint32 index) external returns (address);
        function deployWithSigners(
            address owner,
            uint32 index,
            address[] calldata signers,
            uint8 requiredSigners
        ) external returns (address);

        event AvocadoDeployed(address indexed owner, uint32 indexed index, address indexed avocado);

        error AvoFactory__InvalidParams();
        error AvoFactory__AlreadyDeployed(address avocado);
    }
}

impl AvoFactoryError {
    pub const fn invalid_params() -> Self {
        Self::AvoFactory__InvalidParams(IAvoFactory::AvoFactory__InvalidParams {})
    }

    pub const fn already_deployed(avocado: alloy_primitives::Address) -> Self {
        Self::AvoFactory__AlreadyDeployed(IAvoFactory::AvoFactory__AlreadyDeployed { avocado })
    }
}
