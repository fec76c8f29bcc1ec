#![no_main]

use libfuzzer_sys::fuzz_target;
use mika::coerce::{to_bool, to_float, to_int};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let int = to_int(&input);
    let float = to_float(&input);
    let _ = to_bool(&input);

    // An integer round-trips through its own rendering.
    assert_eq!(to_int(&int.to_string()), int);
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 1e15 {
        assert_eq!(to_int(&input), float as i64);
    }
});
