//! Listing source adapters and the collector that runs them.

pub mod collector;
pub mod demo;
pub mod file;
pub mod http;
pub mod kalshi;
pub mod manifold;
pub mod polymarket;
