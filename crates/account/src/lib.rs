//! Avocado multisig smart-contract account.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod forwarder;
pub mod host;
pub mod multisig;
pub mod proxy;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_util;

pub use config::{AvocadoConfig, ConfigError};
pub use error::{AvocadoError, Result};
pub use factory::{AvoFactory, compute_avocado_address};
pub use forwarder::AvoForwarder;
pub use host::{Host, Program, memory::MemoryHost};
pub use multisig::{AvocadoMultisig, AvocadoMultisigLogic, CastOutcome};
pub use proxy::AvocadoProxy;
