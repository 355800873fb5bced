//! Core domain types
//!
//! This module contains the structures that describe a single trigger
//! invocation: the raw and validated request, and the result record handed
//! back to the caller.

pub mod job;
pub mod result;
