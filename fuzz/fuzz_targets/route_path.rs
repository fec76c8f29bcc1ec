#![no_main]

use libfuzzer_sys::fuzz_target;
use mika::RoutePath;

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = RoutePath::parse(path);
    assert!(!parsed.main().is_empty());
    assert!(!parsed.secondary().is_empty());
    assert!(!parsed.action().is_empty());
    assert!([parsed.main(), parsed.secondary(), parsed.action()].iter().all(|s| *s != "0"));

    let current = parsed.current();
    assert_eq!(RoutePath::parse(&current), parsed);
});
