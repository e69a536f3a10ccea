//! Tests for the credential verifier

#[cfg(test)]
mod service_tests;
