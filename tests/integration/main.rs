//! End-to-end tests against a real PostgreSQL instance.
//!
//! These tests are `#[ignore]`d so the default suite runs without a
//! database. To run them, point `COURTBOOK_TEST_DATABASE_URL` at a
//! disposable database and use:
//!
//! ```text
//! cargo test --test integration -- --ignored --test-threads=1
//! ```

mod helpers;

mod availability_test;
mod lifecycle_test;
mod reservation_test;
