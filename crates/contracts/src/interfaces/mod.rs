pub mod avo_factory;
pub mod avo_forwarder;
pub mod avo_registry;
pub mod avo_signers_list;
pub mod avocado_multisig;
pub mod erc1271;

pub use avo_factory::*;
pub use avo_forwarder::*;
pub use avo_registry::*;
pub use avo_signers_list::*;
pub use avocado_multisig::*;
pub use erc1271::*;
