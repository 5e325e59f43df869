#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(spec) = std::str::from_utf8(data) {
        if let Ok(target) = riepete_deploy::DeployTarget::parse(spec) {
            // Display must render something parse accepts again
            let rendered = target.to_string();
            assert!(riepete_deploy::DeployTarget::parse(&rendered).is_ok());
        }
    }
});
