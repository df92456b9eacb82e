//! End-to-end harness scenarios.
