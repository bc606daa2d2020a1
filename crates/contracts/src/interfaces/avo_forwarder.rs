pub use IAvoForwarder::IAvoForwarderErrors as AvoForwarderError;

crate::sol! {
    /// Trusted relay entry point. Deploys accounts lazily and forwards signed casts.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAvoForwarder {
        struct Action {
            address target;
            bytes data;
            uint256 value;
            uint256 operation;
        }

        struct CastParams {
            Action[] actions;
            uint256 id;
            int256 avoNonce;
            bytes32 salt;
            address source;
            bytes metadata;
        }

        struct CastForwardParams {
            uint256 gas;
            uint256 gasPrice;
            uint256 validAfter;
            uint256 validUntil;
            uint256 value;
        }

        struct SignatureParams {
            bytes signature;
            address signer;
        }

        struct CastChainAgnosticParams {
            CastParams params;
            CastForwardParams forwardParams;
            uint256 chainId;
        }

        struct ChainAgnosticHash {
            bytes32 hash;
            uint256 chainId;
        }

        function computeAvocado(address owner, uint32 index) external view returns (address);

        function execute(
            address owner,
            uint32 index,
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function simulate(
            address owner,
            uint32 index,
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function verify(
            address owner,
            uint32 index,
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external view returns (bool);

        function executeChainAgnostic(
            address owner,
            uint32 index,
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external payable returns (bool success, string memory revertReason);

        function simulateChainAgnostic(
            address owner,
            uint32 index,
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external payable returns (bool success, string memory revertReason);

        function verifyChainAgnostic(
            address owner,
            uint32 index,
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external view returns (bool);

        event Executed(address indexed avocadoOwner, uint32 index, address indexed avocadoAddress, address indexed source, bytes metadata);
        event ExecuteFailed(address indexed avocadoOwner, uint32 index, address indexed avocadoAddress, address indexed source, bytes metadata, string reason);

        error AvoForwarder__InvalidParams();
        error AvoForwarder__Unauthorized();
    }
}

impl AvoForwarderError {
    pub const fn invalid_params() -> Self {
        Self::AvoForwarder__InvalidParams(IAvoForwarder::AvoForwarder__InvalidParams {})
    }

    pub const fn unauthorized() -> Self {
        Self::AvoForwarder__Unauthorized(IAvoForwarder::AvoForwarder__Unauthorized {})
    }
}
