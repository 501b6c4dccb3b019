use std::path::{Component, Path, PathBuf};

/// Locations of the content tree served by the site
#[derive(Debug, Clone)]
pub struct ContentPaths {
    /// Content root (content/)
    pub root: PathBuf,
    /// Page templates (content/views/)
    pub views_dir: PathBuf,
    /// Reusable fragments (content/partials/)
    pub partials_dir: PathBuf,
    /// Stylesheets and images (content/static/)
    pub static_dir: PathBuf,
}

impl ContentPaths {
    /// Lay out the standard subdirectories under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            views_dir: root.join("views"),
            partials_dir: root.join("partials"),
            static_dir: root.join("static"),
            root,
        }
    }

    /// Path of a view template, e.g. `home/index` -> views/home/index.html
    pub fn view_file(&self, name: &str) -> Option<PathBuf> {
        template_file(&self.views_dir, name)
    }

    /// Path of a partial template
    pub fn partial_file(&self, name: &str) -> Option<PathBuf> {
        template_file(&self.partials_dir, name)
    }

    /// Path of a static asset addressed by its URL path (e.g. `/styles/site.css`)
    ///
    /// Returns `None` when the path would escape the static directory.
    pub fn static_file(&self, url_path: &str) -> Option<PathBuf> {
        let relative = Path::new(url_path.trim_start_matches('/'));
        if relative.as_os_str().is_empty() || !PathUtils::is_safe_path(relative) {
            return None;
        }
        Some(self.static_dir.join(relative))
    }
}

fn template_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let relative = PathBuf::from(format!("{}.html", name));
    PathUtils::is_safe_path(&relative).then(|| dir.join(relative))
}

/// Utilities for working with paths
pub struct PathUtils;

impl PathUtils {
    /// Check if path is safe (relative, no traversal)
    pub fn is_safe_path(path: &Path) -> bool {
        path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}
