/*! Integration tests for fieldmap.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - bean: Tests for registration tables, inheritance and construction
 * - naming: Tests for camelCase / underscore conversion, including property tests
 * - resolver: Tests for the PropertyResolver and its cache
 * - convert: Tests for coercion through the ConverterRegistry
 * - mapper: Tests for the mapping engine, plan caching and bean utilities
 * - diff: Tests for field-level object comparison
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("fieldmap=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod bean;
mod convert;
mod diff;
mod helpers;
mod mapper;
mod naming;
