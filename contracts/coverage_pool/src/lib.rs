#![no_std]

mod contract;
mod controller;
mod coverage_pool;
mod events;
mod interfaces;
mod ledger;
pub mod storage;

pub use contract::{ CoveragePool, CoveragePoolClient };
