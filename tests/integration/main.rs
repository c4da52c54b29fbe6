//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one layer of the crate
//! against mock adapters.  All tests run on the host with no real
//! hardware required.

mod dispatcher_tests;
mod session_tests;
mod store_concurrency_tests;
