//! Avocado multisig account ABI definitions.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use alloy_sol_types::sol;

pub mod interfaces;
pub use interfaces::*;
