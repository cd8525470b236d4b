//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod evaluators;
pub mod search;
pub mod stores;
pub mod test_dependencies;
pub mod traits;
pub mod world_bank;

pub use deps::ServerDeps;
pub use evaluators::{LlmEvaluator, Vendor};
pub use stores::{MemoryScoreStore, PostgresScoreStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use world_bank::WorldBankClient;
