//! Integration tests for the holdings aggregator

mod holdings_tests;
