//! Tests for the capture simulator
//!
//! Organized by binding policy and feature area

mod error_tests;
mod helpers;
mod per_iteration_tests;
mod shared_tests;
