//! Core module for symbol cluster analysis
//!
//! This module contains the counting engine: window extraction, symbol
//! classification, per-scope aggregation and ranking.

pub mod aggregator;
pub mod classifier;
pub mod ranker;
pub mod window;
