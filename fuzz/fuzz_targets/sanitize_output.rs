// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 IssueLens Contributors

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let result = issuelens_core::ai::sanitize::sanitize(s);
        assert!(result.suggested_labels.len() <= 3);
        assert!(result.suggested_labels.iter().all(|l| !l.is_empty() && l.trim() == l));
    }
});
