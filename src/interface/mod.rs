//! Interface layer

pub mod cli;
