// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the core modules so
// that test and bench harnesses can import them via `chemdrill::markup::*` etc.
// The terminal front end is only exercised through the binary.
#![allow(dead_code)]

pub mod content;
pub mod markup;
pub mod session;
