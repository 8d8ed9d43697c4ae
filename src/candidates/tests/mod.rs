// src/candidates/tests/mod.rs

mod handlers_tests;
mod validators_tests;
