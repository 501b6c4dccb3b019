//! Template loading by logical name
//!
//! Templates are read fresh on every call; nothing is cached between renders.

use crate::io::ContentPaths;
use crate::{Result, ShelterError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// The two families of templates a page is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// A full page (`home/index`, `editCat`, ...)
    View,
    /// A fragment embedded into views or repeated per record
    Partial,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::View => write!(f, "view"),
            TemplateKind::Partial => write!(f, "partial"),
        }
    }
}

/// Where template text comes from
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Load the raw text of a template
    async fn load(&self, kind: TemplateKind, name: &str) -> Result<String>;
}

fn missing(kind: TemplateKind, name: &str, source: std::io::Error) -> ShelterError {
    ShelterError::Template {
        name: format!("{} '{}'", kind, name),
        source,
    }
}

/// Templates on disk under a content root
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    paths: ContentPaths,
}

impl FsTemplateSource {
    pub fn new(paths: ContentPaths) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl TemplateSource for FsTemplateSource {
    async fn load(&self, kind: TemplateKind, name: &str) -> Result<String> {
        let path = match kind {
            TemplateKind::View => self.paths.view_file(name),
            TemplateKind::Partial => self.paths.partial_file(name),
        }
        .ok_or_else(|| {
            missing(
                kind,
                name,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unsafe template name"),
            )
        })?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| missing(kind, name, e))
    }
}

/// Templates held in memory, keyed by kind and name
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateSource {
    templates: HashMap<(TemplateKind, String), String>,
}

impl MemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates
            .insert((TemplateKind::View, name.into()), text.into());
        self
    }

    pub fn with_partial(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates
            .insert((TemplateKind::Partial, name.into()), text.into());
        self
    }
}

#[async_trait]
impl TemplateSource for MemoryTemplateSource {
    async fn load(&self, kind: TemplateKind, name: &str) -> Result<String> {
        self.templates
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| {
                missing(
                    kind,
                    name,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such template"),
                )
            })
    }
}
