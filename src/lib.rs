#![warn(rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod handler;
pub mod healthcheck;

pub use healthcheck::{healthcheck, healthcheck_with_port};
