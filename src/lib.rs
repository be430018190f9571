//! Payroll Engine for the Enjoy Dive center
//!
//! This crate calculates monthly pay slips: base salary, stored allowances,
//! overtime, the religion-gated holiday allowance (THR), the company tip
//! pool and PPN, with an audit trace of every step. It also aggregates
//! period summaries and monthly trends, and serves them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
