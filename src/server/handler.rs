use super::form::decode_urlencoded;
use super::http::{Request, Response};
use super::router::{Route, Submission};
use crate::catalog::RecordStore;
use crate::config::ServerConfig;
use crate::engine::{FsTemplateSource, Page, PageComposer};
use crate::io::ContentPaths;
use crate::Result;
use std::sync::Arc;

/// Body of every not-found page
pub const NOT_FOUND_BODY: &str = "<h1>ERROR 404</h1>";

/// Request handling shared by all connections
#[derive(Clone)]
pub struct App {
    composer: PageComposer,
    paths: ContentPaths,
    strict_status: bool,
}

impl App {
    pub fn new(composer: PageComposer, paths: ContentPaths) -> Self {
        Self {
            composer,
            paths,
            strict_status: false,
        }
    }

    /// Use a real 404 status on not-found pages
    pub fn with_strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    /// Load the record store and wire up templates from the config
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let store = Arc::new(RecordStore::load(&config.data_file)?);
        let paths = ContentPaths::new(&config.content_root);
        let templates = Arc::new(FsTemplateSource::new(paths.clone()));

        Ok(Self::new(PageComposer::new(store, templates), paths)
            .with_strict_status(config.strict_status))
    }

    /// Produce the response for one request
    ///
    /// Errors mean a template or asset needed by the page could not be read.
    pub async fn handle(&self, request: &Request) -> Result<Response> {
        let route = Route::resolve(&request.method, &request.path, request.query.as_deref());
        tracing::debug!(method = %request.method, path = %request.path, ?route, "routed");

        match route {
            Route::List { query } => {
                let html = self.composer.render_list(query.as_deref()).await?;
                Ok(Response::html(html))
            }
            Route::CreateForm(kind) => {
                let html = self.composer.render_create_form(kind).await?;
                Ok(Response::html(html))
            }
            Route::EditForm(id) => match self.composer.render_edit_form(id).await? {
                Page::Html(html) => Ok(Response::html(html)),
                Page::NotFound => Ok(self.not_found()),
            },
            Route::Submit(submission) => {
                self.discard_submission(submission, &request.body);
                Ok(Response::empty())
            }
            Route::Static { path, content_type } => self.serve_static(&path, content_type).await,
            Route::NotFound => Ok(self.not_found()),
        }
    }

    fn not_found(&self) -> Response {
        let response = Response::html(NOT_FOUND_BODY);
        if self.strict_status {
            response.with_status(404)
        } else {
            response
        }
    }

    /// Form submissions are accepted and logged; nothing is stored
    fn discard_submission(&self, submission: Submission, body: &[u8]) {
        let fields = decode_urlencoded(&String::from_utf8_lossy(body));
        tracing::info!(
            form = submission.name(),
            fields = ?fields,
            "form submission received and discarded"
        );
    }

    async fn serve_static(&self, url_path: &str, content_type: &'static str) -> Result<Response> {
        let decoded = urlencoding::decode(url_path)
            .map(|path| path.into_owned())
            .unwrap_or_else(|_| url_path.to_string());
        let Some(file) = self.paths.static_file(&decoded) else {
            tracing::warn!(path = url_path, "rejected static path");
            return Ok(self.not_found());
        };

        let is_file = tokio::fs::metadata(&file)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::debug!(path = %file.display(), "static file missing");
            return Ok(self.not_found());
        }

        let bytes = tokio::fs::read(&file).await?;
        Ok(Response::bytes(content_type, bytes))
    }
}
