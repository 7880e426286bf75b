pub mod seed_store;

pub use seed_store::{SeedRecord, SeedStore};
