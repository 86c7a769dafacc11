use std::cmp::Ordering;
use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::config::ListerConfig;
use crate::fs;
use crate::meta;
use crate::post::BlogPost;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("{file} is missing required metadata export: it needs to `export const meta = {{}}`")]
    MissingMetadata { file: Utf8PathBuf },
    #[error("{file} has malformed metadata: {source}")]
    MalformedMetadata {
        file: Utf8PathBuf,
        source: meta::Error,
    },
    #[error("{first} and {second} both map to the slug `{slug}`")]
    DuplicateSlug {
        slug: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },
}

fn slug_from_path(path: &Utf8Path) -> Option<String> {
    path.file_stem().map(ToOwned::to_owned)
}

fn read_post(path: &Utf8Path) -> Result<BlogPost, Error> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;

    let literal = meta::extract(&contents).ok_or_else(|| Error::MissingMetadata {
        file: path.to_owned(),
    })?;

    let meta = meta::parse(literal).map_err(|source| Error::MalformedMetadata {
        file: path.to_owned(),
        source,
    })?;

    // Only files with an extension are listed, so there is always a stem
    let slug = slug_from_path(path).unwrap_or_default();

    Ok(BlogPost::new(slug, meta))
}

fn ensure_unique_slugs(entries: &[(Utf8PathBuf, BlogPost)]) -> Result<(), Error> {
    let mut seen: HashMap<&str, &Utf8Path> = HashMap::new();
    for (path, post) in entries {
        if let Some(first) = seen.insert(&post.slug, path) {
            return Err(Error::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.to_owned(),
                second: path.clone(),
            });
        }
    }
    Ok(())
}

/// Newest first. Posts without a date go last.
fn by_published_at_desc(a: &BlogPost, b: &BlogPost) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reads every article in the configured directory and returns the visible
/// posts, newest first.
///
/// Any unreadable file, missing or malformed metadata block, or slug
/// collision fails the whole listing. The sort is stable: posts with equal
/// dates stay in file name order.
pub fn list_posts(config: &ListerConfig) -> Result<Vec<BlogPost>, Error> {
    let paths =
        fs::filepaths_with_extensions(&config.dir, &config.extensions).map_err(|source| {
            Error::Io {
                path: config.dir.clone(),
                source,
            }
        })?;

    info!("Found {} post files in {}", paths.len(), config.dir);

    let entries = paths
        .into_iter()
        .map(|path| -> Result<_, Error> {
            let post = read_post(&path)?;
            debug!("Read post `{}` from {path}", post.slug);
            Ok((path, post))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ensure_unique_slugs(&entries)?;

    let mut posts = entries
        .into_iter()
        .map(|(_, post)| post)
        .filter(|post| config.visibility.shows_unpublished() || post.is_published())
        .collect::<Vec<_>>();

    posts.sort_by(by_published_at_desc);

    debug!(
        "Listing {} posts in {} mode",
        posts.len(),
        config.visibility
    );

    Ok(posts)
}
