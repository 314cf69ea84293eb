#![no_main]

use libfuzzer_sys::fuzz_target;
use rmprep::convert::{convert_lines, split_lines, ATTRIBUTE_CHAR};

fuzz_target!(|data: &[u8]| {
    // Decode the same way dataset files are read from disk
    let text = String::from_utf8_lossy(data);
    let lines = split_lines(&text);

    // Conversion must either succeed or report an ambiguous marker, never panic
    if let Ok(csv) = convert_lines(&lines) {
        let rows = lines.iter().filter(|l| !l.contains(ATTRIBUTE_CHAR)).count();
        assert!(csv.len() == rows || csv.len() == rows + 1);
    }
});
