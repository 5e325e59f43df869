#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and target/owner resolution should never panic
        if let Ok(config) = toml::from_str::<riepete_deploy::Config>(content) {
            let _ = config.deploy_target();
            let _ = config.service_account();
        }
    }
});
