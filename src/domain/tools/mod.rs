//! Tool catalog - the functions the model may ask the engine to execute.
//!
//! The model never executes anything itself: it names a tool and supplies
//! arguments, and the workflow's tool stage dispatches through the
//! [`ToolCatalog`]. Dispatch is a name lookup into a closed map; unknown
//! names are a distinct error, never a silent no-op.

mod call;
mod catalog;
mod definition;
mod function;

pub use call::ToolCall;
pub use catalog::{CatalogError, Tool, ToolCatalog};
pub use definition::ToolDefinition;
pub use function::{ToolError, ToolFunction};
