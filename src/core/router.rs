//! # Router
//!
//! Maps a location onto at most one view.
//!
//! ```text
//! "/task/abc123?tab=log"
//!        │
//!        ▼
//!  Location { path: "/task/abc123", query: Some("tab=log") }
//!        │   RouteTable::resolve()
//!        ▼
//!  RouteMatch { view: TaskDetails, pattern: "/task/:taskId", params: {taskId: "abc123"} }
//! ```
//!
//! ## Ranking
//!
//! Patterns that match the same path are ranked rather than tried in table
//! order: every segment is worth 1, a literal segment adds 10 and a `:param`
//! segment adds 3. The highest score wins and ties go to the earlier entry.
//! This keeps `/task/new` on the creation view even though `/task/:taskId`
//! is registered first.
//!
//! Literal segments compare case-insensitively, empty segments (repeated or
//! trailing slashes) are ignored and the query string never takes part in
//! matching. Captured parameters are percent-decoded.

use log::{debug, warn};
use std::fmt;
use url::form_urlencoded;

// ============================================================================
// View identifiers
// ============================================================================

/// Every routed view the shell knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Landing,
    Login,
    SignUp,
    Dashboard,
    WorkspaceOverview,
    TaskList,
    TaskDetails,
    TaskCreate,
    WorkspaceSettings,
    SearchResults,
    Settings,
    NotificationSettings,
}

impl ViewId {
    /// Human-readable page title.
    pub fn title(self) -> &'static str {
        match self {
            ViewId::Landing => "Welcome",
            ViewId::Login => "Log In",
            ViewId::SignUp => "Sign Up",
            ViewId::Dashboard => "Dashboard",
            ViewId::WorkspaceOverview => "Workspace Overview",
            ViewId::TaskList => "Tasks",
            ViewId::TaskDetails => "Task Details",
            ViewId::TaskCreate => "New Task",
            ViewId::WorkspaceSettings => "Workspace Settings",
            ViewId::SearchResults => "Search Results",
            ViewId::Settings => "Settings",
            ViewId::NotificationSettings => "Notification Settings",
        }
    }
}

/// The application's route bindings, in registration order.
pub const STANDARD_ROUTES: &[(&str, ViewId)] = &[
    ("/", ViewId::Landing),
    ("/login", ViewId::Login),
    ("/signup", ViewId::SignUp),
    ("/dashboard", ViewId::Dashboard),
    ("/workspace-overview", ViewId::WorkspaceOverview),
    ("/tasks", ViewId::TaskList),
    ("/task/:taskId", ViewId::TaskDetails),
    ("/task/new", ViewId::TaskCreate),
    ("/workspace-settings", ViewId::WorkspaceSettings),
    ("/search", ViewId::SearchResults),
    ("/settings", ViewId::Settings),
    ("/notifications", ViewId::NotificationSettings),
];

// ============================================================================
// Location
// ============================================================================

/// A parsed location: the path used for matching plus the raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    /// Parse a raw location such as `/search?q=report#top`.
    ///
    /// The fragment is dropped, a missing leading slash is added and an empty
    /// input becomes `/`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            path,
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// First value of a query parameter, form-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::parse("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => write!(f, "{}", self.path),
        }
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Encode a value for use as one path segment. `/`, `?` and `#` are escaped
/// so the value cannot spill into other segments or the query.
pub fn encode_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Inverse of [`encode_segment`]. Bare `&` and `=` are kept as-is.
fn decode_segment(segment: &str) -> String {
    let escaped = segment.replace('&', "%26").replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(value, _)| value.into_owned())
        .unwrap_or_default()
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

const SEGMENT_SCORE: u32 = 1;
const LITERAL_SCORE: u32 = 10;
const PARAM_SCORE: u32 = 3;

/// A path template made of literal and `:name` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = path_segments(pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Ranking score, see the module docs.
    pub fn score(&self) -> u32 {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(_) => SEGMENT_SCORE + LITERAL_SCORE,
                Segment::Param(_) => SEGMENT_SCORE + PARAM_SCORE,
            })
            .sum()
    }

    /// Two patterns with the same shape match exactly the same paths.
    fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a.eq_ignore_ascii_case(b),
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match a location path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::default();
        let mut segments = path_segments(path);

        for expected in &self.segments {
            let actual = segments.next()?;
            match expected {
                Segment::Literal(literal) => {
                    if !literal.eq_ignore_ascii_case(actual) {
                        return None;
                    }
                }
                Segment::Param(name) => params.0.push((name.clone(), decode_segment(actual))),
            }
        }

        // Pattern exhausted: the path must be too
        if segments.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// Parameters captured by a pattern, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Route table
// ============================================================================

/// The result of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: ViewId,
    pub pattern: String,
    pub params: Params,
}

/// Ordered (pattern, view) bindings with unique patterns.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(RoutePattern, ViewId)>,
}

impl RouteTable {
    /// Build a table from bindings. A pattern registered twice keeps its
    /// first binding.
    pub fn from_bindings(bindings: &[(&str, ViewId)]) -> Self {
        let mut table = Self::default();
        for (pattern, view) in bindings {
            table.insert(pattern, *view);
        }
        table
    }

    /// The application's twelve routes.
    pub fn standard() -> Self {
        Self::from_bindings(STANDARD_ROUTES)
    }

    /// Register a binding. Returns `false` if the pattern already exists.
    pub fn insert(&mut self, pattern: &str, view: ViewId) -> bool {
        let parsed = RoutePattern::parse(pattern);
        if self
            .entries
            .iter()
            .any(|(existing, _)| existing.same_shape(&parsed))
        {
            warn!("Ignoring duplicate route pattern {}", pattern);
            return false;
        }
        self.entries.push((parsed, view));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select the highest-ranked matching binding, if any.
    pub fn resolve(&self, location: &Location) -> Option<RouteMatch> {
        let mut best: Option<(u32, RouteMatch)> = None;

        for (pattern, view) in &self.entries {
            let Some(params) = pattern.matches(&location.path) else {
                continue;
            };
            let score = pattern.score();
            // Strictly greater: ties keep the earlier registration
            if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
                best = Some((
                    score,
                    RouteMatch {
                        view: *view,
                        pattern: pattern.as_str().to_string(),
                        params,
                    },
                ));
            }
        }

        match &best {
            Some((_, matched)) => debug!("Resolved {} via {}", location.path, matched.pattern),
            None => debug!("No route matches {}", location.path),
        }
        best.map(|(_, matched)| matched)
    }
}
