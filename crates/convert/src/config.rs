//! Converter configuration: operation filtering, depth ceiling, verbosity.

use std::fmt;
use std::sync::Arc;

/// Default ceiling on nested object-type selection levels per query.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Which root type a field was declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The GraphQL keyword for this operation kind.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Predicate deciding whether a root field becomes a catalog function.
pub type OperationFilter = Arc<dyn Fn(OperationKind, &str) -> bool + Send + Sync>;

/// Options controlling schema conversion.
///
/// ```
/// use toolgen_convert::{ConverterConfig, OperationKind};
///
/// let config = ConverterConfig::new()
///     .with_max_depth(4)
///     .with_operation_filter(|kind, _name| kind == OperationKind::Query);
/// assert_eq!(config.max_depth(), 4);
/// assert!(!config.allows(OperationKind::Mutation, "createWidget"));
/// ```
#[derive(Clone)]
pub struct ConverterConfig {
    filter: Option<OperationFilter>,
    max_depth: usize,
    verbose: bool,
}

impl ConverterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nested object-selection depth per generated query.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Installs an operation filter; non-matching root fields are silently
    /// omitted from the catalog.
    #[must_use]
    pub fn with_operation_filter<F>(self, filter: F) -> Self
    where
        F: Fn(OperationKind, &str) -> bool + Send + Sync + 'static,
    {
        self.with_filter(Arc::new(filter))
    }

    /// Installs a prebuilt [`OperationFilter`] such as
    /// [`ignore_prefix_filter`].
    #[must_use]
    pub fn with_filter(mut self, filter: OperationFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Logs skipped cycles and depth cut-offs at `info` level when enabled.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Applies the configured filter (accept-all when unset).
    #[must_use]
    pub fn allows(&self, kind: OperationKind, field_name: &str) -> bool {
        self.filter.as_ref().is_none_or(|f| f(kind, field_name))
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            filter: None,
            max_depth: DEFAULT_MAX_DEPTH,
            verbose: false,
        }
    }
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("max_depth", &self.max_depth)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Builds a filter that drops root fields starting with any of the given
/// prefixes (case-insensitive). Handy for hiding internal mutations:
///
/// ```
/// use toolgen_convert::{ignore_prefix_filter, ConverterConfig, OperationKind};
///
/// let config =
///     ConverterConfig::new().with_filter(ignore_prefix_filter(["internal", "debug"]));
/// assert!(!config.allows(OperationKind::Query, "internalUsers"));
/// assert!(config.allows(OperationKind::Query, "users"));
/// ```
pub fn ignore_prefix_filter<I, S>(prefixes: I) -> OperationFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let prefixes: Vec<String> = prefixes
        .into_iter()
        .map(|p| p.into().trim().to_lowercase())
        .collect();
    Arc::new(move |_kind, name| {
        let name = name.trim().to_lowercase();
        !prefixes.iter().any(|prefix| name.starts_with(prefix))
    })
}
