//! Stage handlers.
//!
//! Each handler consumes one event kind, mutates the run context, and
//! returns its successor event. Handlers are methods on the engine so they
//! share its collaborators, split one per file.

mod call_model;
mod call_tools;
mod download_file;
mod extract_answer;
mod start;
mod upload_file;
