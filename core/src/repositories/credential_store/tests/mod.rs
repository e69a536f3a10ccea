//! Tests for the credential store implementations

#[cfg(test)]
mod memory_tests;
