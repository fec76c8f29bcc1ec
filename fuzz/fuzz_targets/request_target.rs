#![no_main]

use libfuzzer_sys::fuzz_target;
use mika::{Request, RoutePath};

fuzz_target!(|data: &[u8]| {
    let Ok(target) = std::str::from_utf8(data) else {
        return;
    };

    let request = Request::get(target);
    assert!(!request.path().contains('?'));
    let _ = RoutePath::parse(request.path());
    for (name, value) in request.query_params() {
        let _ = (name.len(), value.len());
    }
});
