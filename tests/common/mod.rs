//! Shared fixtures: an on-disk content tree with a handful of cats

#![allow(dead_code)]

use cat_shelter::catalog::{Cat, RecordStore};
use cat_shelter::config::ServerConfig;
use cat_shelter::server::App;
use std::path::Path;
use tempfile::TempDir;

pub const NAV: &str = "<nav>menu</nav>";
pub const LIST_VIEW: &str = "{{nav-menu}}<input value=\"{{query}}\"><ul>{{cat-list-items}}</ul>";
pub const LIST_ITEM: &str = "<li id=\"{{id}}\" data-match=\"{{matchBy}}\">{{name}}</li>";
pub const EDIT_VIEW: &str = "{{nav-menu}}<form action=\"/cats/{{id}}/edit\">{{name}}|{{breed}}|{{description}}|{{imageUrl}}</form>";
pub const ADD_CAT_VIEW: &str = "{{nav-menu}}<h2>Add Cat</h2>";
pub const ADD_BREED_VIEW: &str = "{{nav-menu}}<h2>Add Breed</h2>";
pub const STYLESHEET: &str = "body { color: black; }";

pub fn sample_cats() -> Vec<Cat> {
    vec![
        Cat::new(1, "Milo", "Siamese", "Talks all day").with_attribute("imageUrl", "milo.jpg"),
        Cat::new(2, "Tom", "Abyssinian", "Naps on keyboards").with_attribute("imageUrl", "tom.jpg"),
        Cat::new(3, "Zed", "Persian", "Sleeps in the sink").with_attribute("imageUrl", "zed.jpg"),
        Cat::new(4, "Ann", "Zebu-striped tabby", "Chases laser dots")
            .with_attribute("imageUrl", "ann.jpg"),
        Cat::new(5, "Bella", "Bengal", "Loves the siamese next door")
            .with_attribute("imageUrl", "bella.jpg"),
    ]
}

pub fn sample_store() -> RecordStore {
    RecordStore::from_records(sample_cats()).expect("sample cats have unique ids")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Write views, partials, static files and data.json into a fresh temp dir
pub fn content_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "views/home/index.html", LIST_VIEW);
    write(root, "views/editCat.html", EDIT_VIEW);
    write(root, "views/addCat.html", ADD_CAT_VIEW);
    write(root, "views/addBreed.html", ADD_BREED_VIEW);
    write(root, "partials/nav-menu.html", NAV);
    write(root, "partials/cat-list-item.html", LIST_ITEM);
    write(root, "static/styles/site.css", STYLESHEET);
    write(
        root,
        "data.json",
        &serde_json::to_string(&sample_cats()).unwrap(),
    );

    dir
}

pub fn config_for(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        content_root: root.to_path_buf(),
        data_file: root.join("data.json"),
        strict_status: false,
        ..Default::default()
    }
}

pub fn app_for(root: &Path) -> App {
    App::from_config(&config_for(root)).unwrap()
}
