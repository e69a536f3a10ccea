//! Tests for the lockout scheduler
