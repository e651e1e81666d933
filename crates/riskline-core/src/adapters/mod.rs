//! Market data adapters.

pub mod moex;

pub use moex::{MoexClient, MoexConfig};
