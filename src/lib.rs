//! Job worth-it calculator.
//!
//! This crate scores how worthwhile a job is: daily salary divided by
//! effective hours (work plus commute, less half the slacking time), scaled
//! by the average of several environment factors and sorted into one of
//! eight humorous tiers. It also renders the result as a shareable PNG.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod models;
pub mod validation;
