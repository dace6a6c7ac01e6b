//! End-to-end pipeline tests against a fake Python, Qt and deploy toolchain.

#![cfg(unix)]

mod common;
mod pipeline_tests;
