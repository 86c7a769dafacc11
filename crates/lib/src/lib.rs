#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod date;
mod fs;
pub mod list;
pub mod meta;
pub mod post;

pub use config::{ListerConfig, VisibilityMode};
pub use list::list_posts;
pub use post::BlogPost;

/// Whether `path` is a file the lister would pick up with these extensions.
#[must_use]
pub fn is_article_path(path: &camino::Utf8Path, extensions: &[String]) -> bool {
    fs::path_has_extensions(path, extensions)
}
