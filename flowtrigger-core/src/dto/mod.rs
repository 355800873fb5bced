//! Data Transfer Objects for the remote workflow service
//!
//! This module contains the wire shapes exchanged with the Databricks Jobs
//! REST API. Domain types convert into and out of these at the client
//! boundary.

pub mod run;
