use std::{fmt, str::FromStr};

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Whether unpublished posts are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    /// Every post is listed, published or not.
    Development,
    /// Only posts whose `published` field is truthy.
    #[default]
    Production,
}

impl VisibilityMode {
    #[must_use]
    pub fn shows_unpublished(self) -> bool {
        matches!(self, VisibilityMode::Development)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown visibility mode `{0}`, expected `development` or `production`")]
pub struct ParseVisibilityModeError(String);

impl FromStr for VisibilityMode {
    type Err = ParseVisibilityModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(VisibilityMode::Development),
            "production" | "prod" => Ok(VisibilityMode::Production),
            _ => Err(ParseVisibilityModeError(s.to_owned())),
        }
    }
}

impl fmt::Display for VisibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityMode::Development => f.write_str("development"),
            VisibilityMode::Production => f.write_str("production"),
        }
    }
}

pub const DEFAULT_POSTS_DIR: &str = "posts";
pub const DEFAULT_EXTENSION: &str = "mdx";

#[derive(Debug, Clone)]
pub struct ListerConfig {
    /// Directory holding the article files. Not searched recursively.
    pub dir: Utf8PathBuf,
    /// Article file extensions, without the leading dot. Matched exactly.
    pub extensions: Vec<String>,
    pub visibility: VisibilityMode,
}

impl ListerConfig {
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: vec![DEFAULT_EXTENSION.to_owned()],
            visibility: VisibilityMode::default(),
        }
    }

    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityMode) -> Self {
        self.visibility = visibility;
        self
    }

    /// `posts` under the current working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        let current_dir = Utf8PathBuf::try_from(std::env::current_dir()?)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        Ok(Self::new(current_dir.join(DEFAULT_POSTS_DIR)))
    }
}
