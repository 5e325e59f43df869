#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let output = String::from_utf8_lossy(data);
    let report = riepete_deploy::infrastructure::transfer::parse_itemized(&output, true);
    assert!(report.change_count() + report.unchanged <= output.lines().count());
});
