//! Core report-generation library: prompt templates, completion backends,
//! and the facade that ties them together.

pub mod config;
pub mod error;
pub mod llm;
