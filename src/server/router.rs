//! Maps a method and path onto the site's logical routes

use super::form::query_param;
use super::http::{Method, CONTENT_TYPE_CSS, CONTENT_TYPE_ICON};
use crate::engine::FormKind;
use once_cell::sync::Lazy;
use regex::Regex;

static EDIT_ROUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/cats/(\d+)/edit/?$").expect("edit route pattern is valid"));

/// Which form a discarded submission was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    AddCat,
    AddBreed,
    EditCat(u64),
}

impl Submission {
    pub fn name(&self) -> &'static str {
        match self {
            Submission::AddCat => "add-cat",
            Submission::AddBreed => "add-breed",
            Submission::EditCat(_) => "edit-cat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Cat list, optionally filtered by a search query
    List { query: Option<String> },
    CreateForm(FormKind),
    EditForm(u64),
    /// Form POST whose body is decoded and dropped
    Submit(Submission),
    /// File under the static directory
    Static {
        path: String,
        content_type: &'static str,
    },
    NotFound,
}

impl Route {
    /// Resolve a request; `path` is still percent-encoded
    pub fn resolve(method: &Method, path: &str, query: Option<&str>) -> Route {
        match method {
            Method::Get => Self::resolve_get(path, query),
            Method::Post => Self::resolve_post(path),
            Method::Other(_) => Route::NotFound,
        }
    }

    fn resolve_get(path: &str, query: Option<&str>) -> Route {
        match path {
            "/" => Route::List { query: None },
            "/search" => Route::List {
                query: query.and_then(|q| query_param(q, "q")),
            },
            "/cats/add-cat" => Route::CreateForm(FormKind::Cat),
            "/cats/add-breed" => Route::CreateForm(FormKind::Breed),
            _ if path.starts_with("/styles/") => Route::Static {
                path: path.to_string(),
                content_type: CONTENT_TYPE_CSS,
            },
            _ if path.starts_with("/images/") => Route::Static {
                path: path.to_string(),
                content_type: CONTENT_TYPE_ICON,
            },
            _ => match edit_id(path) {
                Some(id) => Route::EditForm(id),
                None => Route::NotFound,
            },
        }
    }

    fn resolve_post(path: &str) -> Route {
        match path {
            "/cats/add-cat" => Route::Submit(Submission::AddCat),
            "/cats/add-breed" => Route::Submit(Submission::AddBreed),
            _ => match edit_id(path) {
                Some(id) => Route::Submit(Submission::EditCat(id)),
                None => Route::NotFound,
            },
        }
    }
}

/// Id captured from `/cats/{id}/edit`; ids that overflow are treated as no match
fn edit_id(path: &str) -> Option<u64> {
    EDIT_ROUTE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
