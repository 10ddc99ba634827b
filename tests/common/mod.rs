//! Common test utilities for busybeaver.
//!
//! This module provides shared utilities for testing the busybeaver server.

pub mod assertions;
pub mod http_client;
pub mod test_data;
