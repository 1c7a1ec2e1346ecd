//! Integration test suite for howto
//!
//! End-to-end tests against the compiled binary and the public library API.
//! Network traffic only ever goes to local mock servers.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **commands**: The `howto` binary driven through `assert_cmd`
//! - **upgrade_flow**: Full self-upgrades against a mock release server

mod commands;
mod upgrade_flow;
