//! Utility functions
//!
//! Provides logging setup for the command line front end.

pub mod logging;
