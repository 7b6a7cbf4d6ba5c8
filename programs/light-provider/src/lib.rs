//! Command line access to a tendermint light client provider.
#![deny(missing_docs, clippy::nursery, clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod observability;
