//! Rendering engine: placeholder substitution, search and page composition

pub mod composer;
pub mod search;
pub mod substitution;
pub mod templates;

pub use composer::{FormKind, Page, PageComposer};
pub use search::{search_and_rank, MatchField, Ranked};
pub use substitution::{substitute, TemplateVars};
pub use templates::{FsTemplateSource, MemoryTemplateSource, TemplateKind, TemplateSource};
