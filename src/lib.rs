//! qa library
//!
//! Web-sourced question answering: search, relevance filtering with an LLM judge,
//! answer selection and justification. Exposed as a library for testing and reuse.

pub mod answer;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod prompts;
pub mod question;
pub mod search;
pub mod server;
pub mod service;
