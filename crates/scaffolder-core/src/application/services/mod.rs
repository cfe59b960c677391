//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "rewrite a tree" or "scaffold a project".

pub mod scaffold_service;
pub mod tree_rewriter;

pub use scaffold_service::{ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStep};
pub use tree_rewriter::TreeRewriter;
