//! Integration tests for CYNA.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p cyna-cli -- migrate
//!
//! # Start the server
//! cargo run -p cyna-server
//!
//! # Run the suite against it
//! CYNA_TEST_BASE_URL=http://localhost:3000 cargo test -p cyna-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server.

use reqwest::Client;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CYNA_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A cookie-holding client, so login sessions persist across requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for test isolation.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}+{}@test.cyna.io", uuid::Uuid::new_v4().simple())
}
