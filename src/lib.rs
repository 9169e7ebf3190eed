//! Gaia Agent - Benchmark Question-Answering Agent
//!
//! This crate drives a large-language-model through a staged workflow
//! (attachment retrieval, file ingestion, inference, tool execution, answer
//! extraction) to answer evaluation-service questions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
