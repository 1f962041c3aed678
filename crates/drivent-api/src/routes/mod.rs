//! # API Route Modules
//!
//! - `hotels`: hotel and room listings gated by ticket eligibility.

pub mod hotels;
