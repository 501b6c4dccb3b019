//! Page composition
//!
//! Every page is built in two passes: the shared partials are expanded into
//! the view first, then the view-specific values are substituted.

use super::search::{search_and_rank, Ranked};
use super::substitution::{substitute, TemplateVars};
use super::templates::{TemplateKind, TemplateSource};
use crate::catalog::{Cat, RecordStore};
use crate::Result;
use std::sync::Arc;

/// View holding the cat list and search box
pub const LIST_VIEW: &str = "home/index";
/// View holding the edit form for one cat
pub const EDIT_VIEW: &str = "editCat";
/// Partial rendered once per listed cat
pub const LIST_ITEM_PARTIAL: &str = "cat-list-item";
/// Partials expanded into every view, by placeholder name
pub const SHARED_PARTIALS: &[&str] = &["nav-menu"];

/// Placeholder receiving the rendered list items
pub const LIST_ITEMS_KEY: &str = "cat-list-items";
/// Placeholder receiving the search text
pub const QUERY_KEY: &str = "query";
/// Placeholder receiving the matched field of a list item
pub const MATCH_BY_KEY: &str = "matchBy";

/// Which creation form to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Cat,
    Breed,
}

impl FormKind {
    pub fn view_name(&self) -> &'static str {
        match self {
            FormKind::Cat => "addCat",
            FormKind::Breed => "addBreed",
        }
    }
}

/// Outcome of rendering a page that may not exist
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Html(String),
    NotFound,
}

/// Builds HTML documents from templates and the record store
#[derive(Clone)]
pub struct PageComposer {
    store: Arc<RecordStore>,
    templates: Arc<dyn TemplateSource>,
}

impl PageComposer {
    pub fn new(store: Arc<RecordStore>, templates: Arc<dyn TemplateSource>) -> Self {
        Self { store, templates }
    }

    /// The cat list, filtered and ranked when `query` is given
    pub async fn render_list(&self, query: Option<&str>) -> Result<String> {
        let page = self.build_page(LIST_VIEW).await?;
        let items = self.render_cat_list(query).await?;

        let vars = TemplateVars::new()
            .with(LIST_ITEMS_KEY, items)
            .with(QUERY_KEY, query.unwrap_or_default());

        Ok(substitute(&page, &vars))
    }

    /// The edit form for cat `id`
    pub async fn render_edit_form(&self, id: u64) -> Result<Page> {
        let Some(cat) = self.store.find(id) else {
            tracing::debug!(id, "edit requested for unknown cat");
            return Ok(Page::NotFound);
        };

        let page = self.build_page(EDIT_VIEW).await?;
        Ok(Page::Html(substitute(&page, &record_vars(cat))))
    }

    /// An empty creation form
    pub async fn render_create_form(&self, kind: FormKind) -> Result<String> {
        self.build_page(kind.view_name()).await
    }

    async fn build_page(&self, view: &str) -> Result<String> {
        let template = self.templates.load(TemplateKind::View, view).await?;

        let mut partials = TemplateVars::new();
        for name in SHARED_PARTIALS {
            let text = self.templates.load(TemplateKind::Partial, name).await?;
            partials.insert(*name, text);
        }

        Ok(substitute(&template, &partials))
    }

    async fn render_cat_list(&self, query: Option<&str>) -> Result<String> {
        let item_template = self
            .templates
            .load(TemplateKind::Partial, LIST_ITEM_PARTIAL)
            .await?;

        let rendered = search_and_rank(self.store.all(), query)
            .iter()
            .map(|hit| substitute(&item_template, &item_vars(hit)))
            .collect();

        Ok(rendered)
    }
}

/// Values for one list item: every record field plus the match annotation
///
/// Unfiltered lists carry no annotation, so `{{matchBy}}` stays unbound.
fn item_vars(hit: &Ranked<'_>) -> TemplateVars {
    let mut vars = record_vars(hit.cat);
    if let Some(field) = hit.match_by {
        vars.insert(MATCH_BY_KEY, field.as_str());
    }
    vars
}

fn record_vars(cat: &Cat) -> TemplateVars {
    cat.fields().into_iter().collect()
}
