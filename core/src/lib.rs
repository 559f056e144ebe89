//! Constrained, randomized assignment of staff to time slots over a
//! multi-day operating window.
//!
//! Leaves first: `employee` and `day` hold data, `availability` decides
//! eligibility, `allocation` fills one day, `engine` drives the week and
//! hands each finished day to a `report::ScheduleSink`.

pub mod allocation;
pub mod availability;
pub mod config;
pub mod day;
pub mod employee;
pub mod engine;
pub mod error;
pub mod report;
pub mod rng;
pub mod types;
