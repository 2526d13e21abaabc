//! Test modules for colcrate-io
//!
//! Stream-level tests that drive the accumulator, codec and rewriter together.
