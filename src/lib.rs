//! Fuzzy-logic creditworthiness scoring for households.
//!
//! Each household's income and debt are fuzzified into Low/Middle/High
//! memberships, combined by a fixed min/max rule base into Accepted,
//! Considered and Rejected strengths, and defuzzified into a crisp score
//! between 50 and 100, up to floating-point rounding.

pub mod config;
pub mod dataset;
pub mod output;
pub mod plot;
pub mod scoring;
