//! Shared test utilities for the homesync workspace.
//!
//! This crate provides a standard fixture for sync scenarios so crate test
//! suites do not each rebuild temporary configs and home directories. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for a configs root plus a target root

pub mod tree;

pub use tree::TestTree;
