//! Property tests for the rsync itemize parser.

use proptest::prelude::*;

use riepete_deploy::infrastructure::transfer::parse_itemized;

fn change_line() -> impl Strategy<Value = String> {
    let path = proptest::string::string_regex("[a-z]{1,8}(/[a-z]{1,8}){0,2}\\.jar").unwrap();
    let code = prop_oneof![
        Just(">f+++++++++".to_string()),
        Just(">f.st......".to_string()),
        Just(".f         ".to_string()),
        Just("*deleting  ".to_string()),
    ];
    (code, path).prop_map(|(code, path)| format!("{} {}", code, path))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the parser never panics on arbitrary output.
    #[test]
    fn property_parse_never_panics(output in "(?s).{0,1024}") {
        let _ = parse_itemized(&output, true);
    }

    /// PROPERTY: every well-formed file line is counted exactly once.
    #[test]
    fn property_every_change_line_is_counted(
        lines in proptest::collection::vec(change_line(), 0..32),
    ) {
        let output = format!("sending incremental file list\n{}\n\nsent 1 bytes\n", lines.join("\n"));
        let report = parse_itemized(&output, true);

        prop_assert_eq!(report.change_count() + report.unchanged, lines.len());
        prop_assert!(report.dry_run);
    }
}
