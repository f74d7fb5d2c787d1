//! # pagseguro-cli
//!
//! Command-line front end: validate an order file, register it as a
//! checkout and print the buyer redirect URL.

pub mod cli;
pub mod commands;
