pub use IAvocadoMultisig::{
    IAvocadoMultisigErrors as AvocadoMultisigError, IAvocadoMultisigEvents as AvocadoMultisigEvent,
};

use alloy_primitives::U256;

crate::sol! {
    /// Avocado multisig smart-contract account.
    ///
    /// Every account is a proxy pointing at a logic version. Casts are authorized by an M-of-N
    /// quorum of signers over an EIP-712 digest and executed either through the trusted
    /// forwarder (`cast`, `castChainAgnostic`) or submitted by a signer directly
    /// (`castAuthorized`).
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAvocadoMultisig {
        /// A single sub-call of a cast.
        ///
        /// `operation` is 0 for `call` and 1 for `delegatecall`.
        struct Action {
            address target;
            bytes data;
            uint256 value;
            uint256 operation;
        }

        /// Signed parameters shared by every cast mode.
        struct CastParams {
            Action[] actions;
            uint256 id;
            int256 avoNonce;
            bytes32 salt;
            address source;
            bytes metadata;
        }

        /// Relayer-facing parameters of a forwarded cast.
        struct CastForwardParams {
            uint256 gas;
            uint256 gasPrice;
            uint256 validAfter;
            uint256 validUntil;
            uint256 value;
        }

        /// Parameters of a signer-submitted cast that pays its own fee.
        struct CastAuthorizedParams {
            uint256 maxFee;
            uint256 gasPrice;
            uint256 validAfter;
            uint256 validUntil;
            uint256 gasLimit;
        }

        struct SignatureParams {
            bytes signature;
            address signer;
        }

        /// One chain's portion of a chain-agnostic cast. `chainId` 0 means the executing chain.
        struct CastChainAgnosticParams {
            CastParams params;
            CastForwardParams forwardParams;
            uint256 chainId;
        }

        /// Commitment to one chain's portion of a chain-agnostic cast.
        struct ChainAgnosticHash {
            bytes32 hash;
            uint256 chainId;
        }

        /// Typed-data root of a forwarded cast.
        struct Cast {
            CastParams params;
            CastForwardParams forwardParams;
        }

        /// Typed-data root of an authorized cast.
        struct CastAuthorized {
            CastParams params;
            CastAuthorizedParams authorizedParams;
        }

        /// Typed-data root of a chain-agnostic cast.
        struct CastChainAgnostic {
            ChainAgnosticHash[] hashes;
        }

        // Casts
        function cast(
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function simulateCast(
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function castAuthorized(
            CastParams calldata params,
            CastAuthorizedParams calldata authorizedParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function simulateCastAuthorized(
            CastParams calldata params,
            CastAuthorizedParams calldata authorizedParams,
            SignatureParams[] calldata signaturesParams
        ) external payable returns (bool success, string memory revertReason);

        function castChainAgnostic(
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external payable returns (bool success, string memory revertReason);

        function simulateCastChainAgnostic(
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external payable returns (bool success, string memory revertReason);

        // Verification
        function verify(
            CastParams calldata params,
            CastForwardParams calldata forwardParams,
            SignatureParams[] calldata signaturesParams
        ) external view returns (bool);

        function verifyAuthorized(
            CastParams calldata params,
            CastAuthorizedParams calldata authorizedParams,
            SignatureParams[] calldata signaturesParams
        ) external view returns (bool);

        function verifyChainAgnostic(
            CastChainAgnosticParams calldata params,
            SignatureParams[] calldata signaturesParams,
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external view returns (bool);

        // Digests
        function getSigDigest(
            CastParams calldata params,
            CastForwardParams calldata forwardParams
        ) external view returns (bytes32);

        function getSigDigestAuthorized(
            CastParams calldata params,
            CastAuthorizedParams calldata authorizedParams
        ) external view returns (bytes32);

        function getSigDigestChainAgnostic(
            CastChainAgnosticParams[] calldata params
        ) external view returns (bytes32);

        function getSigDigestChainAgnosticFromHashes(
            ChainAgnosticHash[] calldata chainAgnosticHashes
        ) external view returns (bytes32);

        function getChainAgnosticHashes(
            CastChainAgnosticParams[] calldata params
        ) external view returns (ChainAgnosticHash[] memory);

        function domainSeparatorV4() external view returns (bytes32);
        function domainSeparatorV4ChainAgnostic() external view returns (bytes32);
        function DOMAIN_SEPARATOR_NAME() external view returns (string memory);
        function DOMAIN_SEPARATOR_VERSION() external view returns (string memory);

        // Lifecycle
        function initialize(
            address owner,
            uint32 index,
            address[] calldata signers,
            uint8 requiredSigners
        ) external;

        function upgradeTo(address newImplementation) external;

        // Self-authorized signer and nonce management
        function addSigners(address[] calldata addSigners, uint8 requiredSigners) external;
        function removeSigners(address[] calldata removeSigners, uint8 requiredSigners) external;
        function setRequiredSigners(uint8 requiredSigners) external;
        function occupyAvoNonces(uint256[] calldata avoNonces) external;
        function occupyNonSequentialNonces(bytes32[] calldata nonSequentialNonces) external;

        // Views
        function owner() external view returns (address);
        function index() external view returns (uint32);
        function implementation() external view returns (address);
        function requiredSigners() external view returns (uint8);
        function signersCount() external view returns (uint256);
        function signers() external view returns (address[] memory);
        function isSigner(address signer) external view returns (bool);
        function avoNonce() external view returns (uint256);
        function nonSequentialNonces(bytes32 nonce) external view returns (bool);

        // Events
        event Initialized(address indexed owner, uint32 indexed index);
        event CastExecuted(address indexed source, address indexed caller, address[] signers, bytes metadata);
        event CastFailed(address indexed source, address indexed caller, address[] signers, string reason, bytes metadata);
        event FeePaid(uint256 fee);
        event FeePayFailed(uint256 fee);
        event SignerAdded(address indexed signer);
        event SignerRemoved(address indexed signer);
        event RequiredSignersSet(uint8 indexed requiredSigners);
        event ListSyncFailed();
        event AvoNonceOccupied(uint256 indexed occupiedAvoNonce);
        event NonSequentialNonceOccupied(bytes32 indexed occupiedNonSequentialNonce);
        event Upgraded(address indexed newImplementation);

        // Errors
        error AvocadoMultisig__InvalidParams();
        error AvocadoMultisig__InvalidSignature();
        error AvocadoMultisig__InvalidTiming();
        error AvocadoMultisig__Unauthorized();
        error AvocadoMultisig__InsufficientGasSent();
        error AvocadoMultisig__MaxFee(uint256 fee, uint256 maxFee);
        error AvocadoMultisig__InsufficientBalance(uint256 fee);
    }
}

impl AvocadoMultisigError {
    pub const fn invalid_params() -> Self {
        Self::AvocadoMultisig__InvalidParams(IAvocadoMultisig::AvocadoMultisig__InvalidParams {})
    }

    pub const fn invalid_signature() -> Self {
        Self::AvocadoMultisig__InvalidSignature(
            IAvocadoMultisig::AvocadoMultisig__InvalidSignature {},
        )
    }

    pub const fn invalid_timing() -> Self {
        Self::AvocadoMultisig__InvalidTiming(IAvocadoMultisig::AvocadoMultisig__InvalidTiming {})
    }

    pub const fn unauthorized() -> Self {
        Self::AvocadoMultisig__Unauthorized(IAvocadoMultisig::AvocadoMultisig__Unauthorized {})
    }

    pub const fn insufficient_gas_sent() -> Self {
        Self::AvocadoMultisig__InsufficientGasSent(
            IAvocadoMultisig::AvocadoMultisig__InsufficientGasSent {},
        )
    }

    pub const fn max_fee(fee: U256, max_fee: U256) -> Self {
        Self::AvocadoMultisig__MaxFee(IAvocadoMultisig::AvocadoMultisig__MaxFee {
            fee,
            maxFee: max_fee,
        })
    }

    pub const fn insufficient_balance(fee: U256) -> Self {
        Self::AvocadoMultisig__InsufficientBalance(
            IAvocadoMultisig::AvocadoMultisig__InsufficientBalance { fee },
        )
    }
}

impl IAvocadoMultisig::Action {
    /// Operation code of a plain `call`.
    pub const CALL: u8 = 0;
    /// Operation code of a `delegatecall`.
    pub const DELEGATE_CALL: u8 = 1;
}
