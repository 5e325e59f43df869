//! Property tests for the exclusion set.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use riepete_deploy::domain::value_objects::{ExclusionSet, DEFAULT_EXCLUDES};

fn defaults() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

fn relative_path() -> impl Strategy<Value = PathBuf> {
    let segment = proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,11}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: anything under `log/` or `.git/` is excluded, however deep.
    #[test]
    fn property_default_dirs_exclude_everything_below(
        rest in relative_path(),
        is_dir in any::<bool>(),
    ) {
        let set = ExclusionSet::new(Path::new("/"), &defaults()).unwrap();

        prop_assert!(set.is_excluded(&Path::new("log").join(&rest), is_dir));
        prop_assert!(set.is_excluded(&Path::new(".git").join(&rest), is_dir));
    }

    /// PROPERTY: ignore-file patterns only ever add exclusions.
    #[test]
    fn property_ignore_file_never_unexcludes(
        path in relative_path(),
        extra in proptest::collection::vec("[a-z*]{1,6}(\\.[a-z]{1,3})?", 0..6),
    ) {
        let root = Path::new("/");
        let base = ExclusionSet::new(root, &defaults()).unwrap();
        let merged = ExclusionSet::from_content(
            root,
            &defaults(),
            Path::new("/project/.gitignore"),
            &extra.join("\n"),
        ).unwrap();

        if base.is_excluded(&path, false) {
            prop_assert!(merged.is_excluded(&path, false));
        }
    }

    /// PROPERTY: arbitrary ignore-file content never panics.
    #[test]
    fn property_arbitrary_ignore_content_never_panics(
        content in "(?s).{0,512}",
        path in relative_path(),
    ) {
        if let Ok(set) = ExclusionSet::from_content(
            Path::new("/"),
            &[],
            Path::new("/project/.gitignore"),
            &content,
        ) {
            let _ = set.is_excluded(&path, false);
        }
    }
}
