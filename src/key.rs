//! Service identifier helpers.
//!
//! Identifiers are opaque strings. Anything stable works as a key, but the
//! helpers below understand the two conventions used throughout the crate:
//! Rust paths (`app::controllers::BarController`) and backslash namespaces
//! (`App\Controllers\BarController`).

/// Identifier for a Rust type, as produced by `std::any::type_name`.
///
/// ```rust
/// use mika::key_of_type;
///
/// struct Mailer;
/// assert!(key_of_type::<Mailer>().ends_with("Mailer"));
/// assert_eq!(key_of_type::<String>(), "alloc::string::String");
/// ```
pub fn key_of_type<T: ?Sized + 'static>() -> &'static str {
    std::any::type_name::<T>()
}

/// The last path component of an identifier.
///
/// ```rust
/// use mika::simple_name;
///
/// assert_eq!(simple_name("App\\Foo\\Controllers\\BarController"), "BarController");
/// assert_eq!(simple_name("app::foo::BarController"), "BarController");
/// assert_eq!(simple_name("app/foo/BarController"), "BarController");
/// assert_eq!(simple_name("BarController"), "BarController");
/// ```
pub fn simple_name(id: &str) -> &str {
    let cut = [
        id.rfind('\\').map(|i| i + 1),
        id.rfind("::").map(|i| i + 2),
        id.rfind('/').map(|i| i + 1),
    ]
    .into_iter()
    .flatten()
    .max()
    .unwrap_or(0);

    &id[cut..]
}

/// Strips `suffix` from `name` when it is a proper suffix.
///
/// A name that consists solely of the suffix is returned unchanged.
pub(crate) fn strip_proper_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    match name.strip_suffix(suffix) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// Uppercases the first character if it is an ASCII letter.
pub(crate) fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut upper = String::with_capacity(segment.len());
            upper.push(first.to_ascii_uppercase());
            upper.push_str(chars.as_str());
            upper
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_proper_suffix() {
        assert_eq!(strip_proper_suffix("BarController", "Controller"), "Bar");
        assert_eq!(strip_proper_suffix("Controller", "Controller"), "Controller");
        assert_eq!(strip_proper_suffix("Bar", "Controller"), "Bar");
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("bar"), "Bar");
        assert_eq!(upper_first("frameworkName"), "FrameworkName");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_upper_first_leaves_non_ascii() {
        assert_eq!(upper_first("ébar"), "ébar");
        assert_eq!(upper_first("ßtraße"), "ßtraße");
        assert_eq!(upper_first("straße"), "Straße");
    }

    #[test]
    fn test_simple_name_mixed_separators() {
        assert_eq!(simple_name("a::b\\C"), "C");
        assert_eq!(simple_name("a\\b::C"), "C");
        assert_eq!(simple_name(""), "");
    }
}
