#![no_main]
use libfuzzer_sys::fuzz_target;
use lcovrs::ParseOptions;

fuzz_target!(|data: &[u8]| {
    // Parser must not panic on any input, under either policy.
    let strict = ParseOptions::default();
    let lenient = ParseOptions::new()
        .with_ignore_incorrect_counts(true)
        .with_merge_duplicate_line_hit_counts(true);
    let _ = lcovrs::parse_reader(data, &strict);
    let _ = lcovrs::parse_reader(data, &lenient);
});
