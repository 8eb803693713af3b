//! Property-based tests

mod token_proptest;
mod validation_proptest;
