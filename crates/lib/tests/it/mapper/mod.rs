//! Mapping engine integration tests
//!
//! Tests are split by concern: field mapping behavior, plan caching and the
//! property utilities exposed on the mapper.
