//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `github/` - GitHub REST issue tracker
//! - `console/` - terminal reporter and y/n confirmation
//! - `git/` - repository detection from the `origin` remote

pub mod console;
pub mod git;
pub mod github;
