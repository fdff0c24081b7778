#![no_main]

use debugbar_core::css_class;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (cls, prefix) = input;
    if cls.len() > 4096 || prefix.len() > 256 || prefix.contains(' ') {
        return;
    }
    let out = css_class(cls, prefix);
    // One output token per space-separated input token.
    assert_eq!(out.split(' ').count(), cls.split(' ').count());
    if prefix.is_empty() {
        assert_eq!(out, cls);
    }
});
