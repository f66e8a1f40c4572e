#![no_main]

use jira_nlq_core::{describe, translate_with_projects, ORDER_BY_CLAUSE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    for keys in [&[][..], &["PROJ", "ABC"][..]] {
        let result = translate_with_projects(input, keys);
        assert!(result.query.ends_with(ORDER_BY_CLAUSE));
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.parts.is_empty(), result.suggestions.is_some());
        assert!(!describe(&result.parts).is_empty());
    }
});
