pub mod health;
pub mod pairs;

pub use health::health_check;
pub use pairs::{delete_pair, list_pairs, upsert_pair};
