// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 IssueLens Contributors

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok((owner, repo)) = issuelens_core::parse_repo_url(s)
    {
        assert!(!owner.is_empty() && !repo.is_empty());
        assert!(!owner.contains('/') && !repo.contains('/'));
        for segment in [&owner, &repo] {
            assert!(segment != "." && segment != "..");
        }
    }
});
