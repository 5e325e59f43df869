//! Property tests for POSIX shell quoting.

use std::process::Command;

use proptest::prelude::*;

use riepete_deploy::domain::services::{quote, quote_path};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `sh` reads a quoted word back as the original string.
    #[cfg(unix)]
    #[test]
    fn property_quote_round_trips_through_sh(word in "[^\\x00]{0,32}") {
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("printf '%s' {}", quote(&word)))
            .output()
            .unwrap();

        prop_assert!(output.status.success());
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout), word);
    }

    /// PROPERTY: quoting never panics and never leaves a bare `$` or backtick.
    #[test]
    fn property_quoted_words_are_inert(word in "(?s).{0,64}") {
        let quoted = quote(&word);
        if quoted == word {
            prop_assert!(!word.contains('$') && !word.contains('`') && !word.contains(' '));
        } else {
            prop_assert!(quoted.starts_with('\''));
            prop_assert!(quoted.ends_with('\''));
        }
    }

    /// PROPERTY: a leading `~/` survives quoting so the remote shell expands it.
    #[test]
    fn property_tilde_prefix_is_kept(rest in "[A-Za-z0-9 ._-]{1,24}") {
        let quoted = quote_path(&format!("~/{}", rest));
        prop_assert!(quoted.starts_with("~/"));
    }
}
