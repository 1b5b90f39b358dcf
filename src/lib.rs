//! intrinsic: discounted-cash-flow valuation and undervalued-stock ranking.
//!
//! Hexagonal architecture: valuation logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], command dispatch in
//! [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
