use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};

pub fn path_has_extensions<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|e| e.as_ref() == ext))
}

/// Regular files directly inside `dir` whose extension is one of `extensions`,
/// ordered by file name.
pub fn filepaths_with_extensions<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = dir
        .read_dir_utf8()?
        .filter_map(|entry| {
            entry
                .map(|entry| {
                    let path = entry.path().to_path_buf();
                    if !path.is_file() {
                        return None;
                    }
                    if path_has_extensions(&path, extensions) {
                        Some(path)
                    } else {
                        None
                    }
                })
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    paths.sort();

    Ok(paths)
}

#[cfg(test)]
mod test {
    use camino::Utf8Path;
    use pretty_assertions::assert_eq;

    use super::{filepaths_with_extensions, path_has_extensions};

    #[test]
    fn extension_match_is_exact() {
        let exts = ["mdx"];
        assert!(path_has_extensions(Utf8Path::new("posts/a.mdx"), &exts));
        assert!(!path_has_extensions(Utf8Path::new("posts/a.md"), &exts));
        assert!(!path_has_extensions(Utf8Path::new("posts/a.MDX"), &exts));
        assert!(!path_has_extensions(Utf8Path::new("posts/a.mdx.bak"), &exts));
        assert!(!path_has_extensions(Utf8Path::new("posts/mdx"), &exts));
    }

    #[test]
    fn lists_matching_files_sorted_without_recursing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        std::fs::write(dir.join("b.mdx"), "").unwrap();
        std::fs::write(dir.join("a.mdx"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.join("nested.mdx")).unwrap();
        std::fs::write(dir.join("nested.mdx").join("c.mdx"), "").unwrap();

        let files = filepaths_with_extensions(dir, &["mdx"]).unwrap();
        let names = files
            .iter()
            .filter_map(|p| p.file_name())
            .collect::<Vec<_>>();

        assert_eq!(vec!["a.mdx", "b.mdx"], names);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap().join("nope");

        let err = filepaths_with_extensions(&dir, &["mdx"]).unwrap_err();
        assert_eq!(std::io::ErrorKind::NotFound, err.kind());
    }
}
