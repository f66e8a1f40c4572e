// crates/core/src/lib.rs
//! Natural-language issue search: free text in, JQL out.
//!
//! - [`translator`]: staged extraction of project, status, priority, type,
//!   assignee, reporter, date and free-text clauses
//! - [`describe`]: human-readable summary of the extracted parts
//! - [`vocab`]: the ordered synonym and pattern tables both rely on

pub mod describe;
pub mod translator;
pub mod vocab;

pub use describe::describe;
pub use translator::{translate, translate_with_projects, Stage, Translator};
pub use vocab::ORDER_BY_CLAUSE;
