crate::sol! {
    /// Global signer -> accounts index kept in sync on a best-effort basis.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAvoSignersList {
        function notifySignerAdded(address avocado, address signer) external;
        function notifySignerRemoved(address avocado, address signer) external;
        function isSignerOf(address avocado, address signer) external view returns (bool);
    }
}
