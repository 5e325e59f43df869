//! Property tests for the local mirror.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::tempdir;

use riepete_deploy::domain::ports::{SyncRequest, TransferStrategy};
use riepete_deploy::domain::value_objects::{DeployTarget, ExclusionSet, DEFAULT_EXCLUDES};
use riepete_deploy::infrastructure::{LocalMirrorTransfer, SystemCommandRunner};

fn tree() -> impl Strategy<Value = BTreeMap<String, String>> {
    let path = prop_oneof![
        proptest::string::string_regex("[a-c]{1,3}\\.jar").unwrap(),
        proptest::string::string_regex("lib/[a-c]{1,3}\\.jar").unwrap(),
        proptest::string::string_regex("log/[a-c]{1,3}\\.log").unwrap(),
        Just("config/riepete.conf".to_string()),
    ];
    proptest::collection::btree_map(path, "[a-z]{0,16}", 0..10)
}

fn write_tree(root: &Path, files: &BTreeMap<String, String>) {
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn request(source: &Path, dest: &Path) -> SyncRequest {
    let patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
    SyncRequest {
        source: source.to_path_buf(),
        target: DeployTarget::local(dest.display().to_string()),
        exclusions: ExclusionSet::new(source, &patterns).unwrap(),
        delete: true,
        ssh: "ssh".to_string(),
    }
}

fn excluded(rel: &str) -> bool {
    rel.starts_with("log/") || rel == "config/riepete.conf"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after a sync the destination mirrors the source, except
    /// that excluded destination files are left exactly as they were; a
    /// second sync is a no-op.
    #[test]
    fn property_mirror_converges_and_respects_exclusions(
        source_files in tree(),
        dest_files in tree(),
    ) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("dist");
        let dest = dir.path().join("deploy");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&dest).unwrap();
        write_tree(&source, &source_files);
        write_tree(&dest, &dest_files);

        let transfer = LocalMirrorTransfer::new();
        let runner = SystemCommandRunner::new();
        let request = request(&source, &dest);

        transfer.transfer(&request, &runner).unwrap();

        for (rel, content) in &source_files {
            let deployed = fs::read_to_string(dest.join(rel)).ok();
            if excluded(rel) {
                prop_assert_eq!(deployed.as_ref(), dest_files.get(rel));
            } else {
                prop_assert_eq!(deployed.as_ref(), Some(content));
            }
        }
        for (rel, content) in &dest_files {
            let deployed = fs::read_to_string(dest.join(rel)).ok();
            if excluded(rel) {
                prop_assert_eq!(deployed.as_ref(), Some(content));
            } else if !source_files.contains_key(rel) {
                prop_assert!(!dest.join(PathBuf::from(rel)).exists());
            }
        }

        let second = transfer.transfer(&request, &runner).unwrap();
        prop_assert!(second.is_noop(), "second sync changed {:?}", second);
    }
}
