mod watch;

use std::io::Write;

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use postlist_lib::{list_posts, BlogPost, ListerConfig, VisibilityMode};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Prints the blog posts in a directory of article files as JSON, newest first.
#[derive(Parser, Debug)]
#[command(name = "postlist", version)]
struct Cli {
    /// Directory holding the article files [default: ./posts]
    #[arg(long, env = "POSTLIST_DIR", value_name = "PATH")]
    dir: Option<Utf8PathBuf>,

    /// Article file extension, without the dot. Repeat to accept several
    #[arg(
        long = "ext",
        env = "POSTLIST_EXT",
        value_name = "EXT",
        value_delimiter = ',',
        default_value = postlist_lib::config::DEFAULT_EXTENSION
    )]
    extensions: Vec<String>,

    /// `development` also lists unpublished posts
    #[arg(long, env = "POSTLIST_MODE", default_value_t = VisibilityMode::Production)]
    mode: VisibilityMode,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Keep running and print a fresh listing whenever an article changes
    #[arg(long)]
    watch: bool,
}

impl Cli {
    fn lister_config(&self) -> Result<ListerConfig> {
        let config = match &self.dir {
            Some(dir) => ListerConfig::new(dir.clone()),
            None => ListerConfig::from_current_dir()?,
        };
        Ok(config
            .with_extensions(self.extensions.iter().map(|ext| ext.trim_start_matches('.')))
            .with_visibility(self.mode))
    }
}

fn write_posts(out: &mut impl Write, posts: &[BlogPost], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, posts)?;
    } else {
        serde_json::to_writer(&mut *out, posts)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_posts(posts: &[BlogPost], pretty: bool) -> Result<()> {
    write_posts(&mut std::io::stdout().lock(), posts, pretty)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.lister_config()?;

    let posts = list_posts(&config)?;
    print_posts(&posts, cli.pretty)?;

    if cli.watch {
        watch::run(&config, || {
            let listed = list_posts(&config)
                .map_err(anyhow::Error::from)
                .and_then(|posts| print_posts(&posts, cli.pretty));
            if let Err(err) = listed {
                error!("Failed to relist posts: {err}");
            }
        })?;
    }

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use postlist_lib::VisibilityMode;
    use pretty_assertions::assert_eq;

    use super::{write_posts, Cli};

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["postlist", "--dir", "site/posts"]).unwrap();
        let config = cli.lister_config().unwrap();

        assert_eq!("site/posts", config.dir.as_str());
        assert_eq!(vec!["mdx".to_owned()], config.extensions);
        assert_eq!(VisibilityMode::Production, config.visibility);
        assert!(!cli.watch);
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::try_parse_from([
            "postlist",
            "--dir",
            "content",
            "--ext",
            ".md,mdx",
            "--mode",
            "development",
            "--watch",
        ])
        .unwrap();
        let config = cli.lister_config().unwrap();

        assert_eq!(vec!["md".to_owned(), "mdx".to_owned()], config.extensions);
        assert_eq!(VisibilityMode::Development, config.visibility);
        assert!(cli.watch);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["postlist", "--dir", "x", "--mode", "staging"]).is_err());
    }

    #[test]
    fn writes_flat_json_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = camino::Utf8Path::from_path(tmp.path()).unwrap();
        std::fs::write(
            dir.join("first.mdx"),
            "export const meta = {\n  title: 'First',\n  publishedAt: '2023-01-01',\n  published: true,\n}\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("second.mdx"),
            "export const meta = {\n  title: 'Second',\n  publishedAt: '2023-06-01',\n  published: true,\n}\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["postlist", "--dir", dir.as_str(), "--mode", "production"])
            .unwrap();
        let posts = postlist_lib::list_posts(&cli.lister_config().unwrap()).unwrap();

        let mut out = Vec::new();
        write_posts(&mut out, &posts, false).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.ends_with("]\n"));
        assert_eq!(
            serde_json::json!([
                { "slug": "second", "title": "Second", "publishedAt": "2023-06-01", "published": true },
                { "slug": "first", "title": "First", "publishedAt": "2023-01-01", "published": true },
            ]),
            serde_json::from_str::<serde_json::Value>(&out).unwrap()
        );
    }

    #[test]
    fn pretty_output_is_the_same_data() {
        let posts = vec![postlist_lib::BlogPost::new(
            "a".to_owned(),
            serde_json::Map::from_iter([("published".to_owned(), serde_json::json!(true))]),
        )];

        let mut compact = Vec::new();
        write_posts(&mut compact, &posts, false).unwrap();
        let mut pretty = Vec::new();
        write_posts(&mut pretty, &posts, true).unwrap();

        assert_eq!("[{\"slug\":\"a\",\"published\":true}]\n", String::from_utf8(compact).unwrap());
        let pretty = String::from_utf8(pretty).unwrap();
        assert!(pretty.contains("\n  {\n"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
            serde_json::json!([{ "slug": "a", "published": true }])
        );
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
