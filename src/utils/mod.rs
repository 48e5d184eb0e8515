//! Utility modules for the symbol cluster scanner
//!
//! This module contains file traversal and line reading, plus output
//! formatting and export of the ranked results.

pub mod file_utils;
pub mod output_formatter;
