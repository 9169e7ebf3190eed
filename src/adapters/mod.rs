//! Adapters - concrete implementations of the ports.
//!
//! # Module Organization
//!
//! - `gemini` - Generative language API client (inference, file upload, grounded search)
//! - `evaluation` - HTTP client for the scoring service
//! - `tools` - Builtin tool implementations and catalog assembly
//! - `spreadsheet` - Spreadsheet-to-markdown conversion for attachments
//! - `storage` - JSON result store powering question-level resume
//! - `mock` - Scripted port implementations for tests

pub mod evaluation;
pub mod gemini;
pub mod mock;
pub mod spreadsheet;
pub mod storage;
pub mod tools;
