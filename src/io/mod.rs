pub mod paths;

pub use paths::{ContentPaths, PathUtils};
