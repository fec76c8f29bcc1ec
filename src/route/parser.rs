//! Path parsing into `(main, secondary, action)` segments.

use serde::{Deserialize, Serialize};

/// Naming conventions linking path segments to controllers and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteNaming {
    /// Substituted for any missing or empty segment
    pub default_segment: String,
    /// Appended to the action segment to form the method name
    pub action_suffix: String,
    /// Stripped from a controller's simple name before matching
    pub controller_suffix: String,
}

impl Default for RouteNaming {
    fn default() -> Self {
        Self {
            default_segment: "default".to_string(),
            action_suffix: "Action".to_string(),
            controller_suffix: "Controller".to_string(),
        }
    }
}

impl RouteNaming {
    /// Method name for an action segment, e.g. `baz` to `bazAction`.
    pub fn action_method(&self, action: &str) -> String {
        format!("{}{}", action, self.action_suffix)
    }
}

/// A request path split into its three routing segments.
///
/// ```rust
/// use mika::RoutePath;
///
/// let path = RoutePath::parse("/foo/bar/baz");
/// assert_eq!((path.main(), path.secondary(), path.action()), ("foo", "bar", "baz"));
///
/// assert_eq!(RoutePath::parse("/foo").current(), "/foo/default/default");
/// assert_eq!(RoutePath::parse("/").current(), "/default/default/default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath {
    main: String,
    secondary: String,
    action: String,
}

impl RoutePath {
    /// Parses with `default` as the fallback segment.
    pub fn parse(path: &str) -> Self {
        Self::parse_with(path, &RouteNaming::default().default_segment)
    }

    /// Splits on `/`; segments 1 to 3 become main, secondary and action.
    /// Missing, empty, `/` or `0` segments become `default_segment`.
    pub fn parse_with(path: &str, default_segment: &str) -> Self {
        let parts: Vec<&str> = path.split('/').collect();
        let part = |index: usize| match parts.get(index) {
            Some(segment) if !matches!(*segment, "" | "/" | "0") => segment.to_string(),
            _ => default_segment.to_string(),
        };

        Self {
            main: part(1),
            secondary: part(2),
            action: part(3),
        }
    }

    /// First segment: the route name.
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Second segment: selects the controller.
    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    /// Third segment: selects the action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// `/main/secondary/action`
    pub fn current(&self) -> String {
        format!("/{}/{}/{}", self.main, self.secondary, self.action)
    }
}
