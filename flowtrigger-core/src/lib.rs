//! Flow Trigger Core
//!
//! Core types for triggering Databricks workflow runs on behalf of an agent.
//!
//! This crate contains:
//! - Domain types: raw trigger arguments, the validated request, and the
//!   JSON result record
//! - Parameter decoding: explicit-shape decoding of JSON-encoded arguments
//! - DTOs: wire shapes for the Databricks Jobs API
//! - Tool definition: the function-calling descriptor for LLM agents

pub mod domain;
pub mod dto;
pub mod params;
pub mod tool;
