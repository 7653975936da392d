//! Dashboard route table
//!
//! Static mapping from URL path to the view that renders it, plus the sidebar
//! metadata. No guards, no dynamic routes: the table is data.

/// Sidebar metadata for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    /// Menu title
    pub title: &'static str,
    /// Menu icon name
    pub icon: Option<&'static str>,
    /// Keep the tab pinned in the tag bar
    pub fixed: bool,
}

/// What a route resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// A lazily-loaded view, identified by its module path
    View(&'static str),
    /// Another path
    Redirect(&'static str),
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// URL path
    pub path: &'static str,
    /// Route name
    pub name: Option<&'static str>,
    /// View or redirect
    pub target: RouteTarget,
    /// Hidden from the sidebar
    pub hidden: bool,
    /// Sidebar metadata
    pub meta: Option<RouteMeta>,
}

impl Route {
    const fn page(
        path: &'static str,
        name: &'static str,
        view: &'static str,
        title: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            path,
            name: Some(name),
            target: RouteTarget::View(view),
            hidden: false,
            meta: Some(RouteMeta {
                title,
                icon: Some(icon),
                fixed: false,
            }),
        }
    }

    const fn error_page(path: &'static str, name: &'static str, view: &'static str) -> Self {
        Self {
            path,
            name: Some(name),
            target: RouteTarget::View(view),
            hidden: true,
            meta: Some(RouteMeta {
                title: name,
                icon: None,
                fixed: false,
            }),
        }
    }

    const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            target: RouteTarget::Redirect(to),
            hidden: false,
            meta: None,
        }
    }

    /// Whether the route shows up in the sidebar
    #[must_use]
    pub const fn in_sidebar(&self) -> bool {
        !self.hidden && matches!(self.target, RouteTarget::View(_))
    }
}

/// Always-present routes: error pages and the root redirect
pub const CONSTANT_ROUTES: [Route; 3] = [
    Route::error_page("/401", "401", "error-page/401"),
    Route::error_page("/404", "404", "error-page/404"),
    Route::redirect("/", "/data-interface"),
];

/// Feature pages
pub const PAGE_ROUTES: [Route; 6] = [
    Route::page(
        "/data-interface",
        "DataInterface",
        "ml-system/DataInterface",
        "System Interface",
        "vue-dsn-icon-database",
    ),
    Route::page(
        "/machine-learning",
        "MachineLearning",
        "ml-system/MachineLearning",
        "Machine Learning",
        "vue-dsn-icon-cpu",
    ),
    Route::page(
        "/stacking-ensemble",
        "StackingEnsemble",
        "ml-system/StackingEnsemble",
        "Stacking Ensemble",
        "vue-dsn-icon-layer",
    ),
    Route::page(
        "/auto-ml",
        "AutoML",
        "ml-system/AutoML",
        "Automated Machine Learning",
        "vue-dsn-icon-magic",
    ),
    Route::page(
        "/visualization",
        "Visualization",
        "user-system/Visualization",
        "Visual Analysis",
        "vue-dsn-icon-chart",
    ),
    Route::page(
        "/reports",
        "Reports",
        "user-system/Reports",
        "Reports",
        "vue-dsn-icon-document",
    ),
];

const MAX_REDIRECTS: usize = 8;

/// Every route, constant routes first
pub fn all() -> impl Iterator<Item = &'static Route> {
    CONSTANT_ROUTES.iter().chain(PAGE_ROUTES.iter())
}

/// Exact-path lookup
#[must_use]
pub fn find(path: &str) -> Option<&'static Route> {
    all().find(|route| route.path == path)
}

/// Follow redirects until a view is reached
///
/// Returns `None` for unknown paths and redirect loops.
#[must_use]
pub fn resolve(path: &str) -> Option<&'static Route> {
    let mut route = find(path)?;
    for _ in 0..MAX_REDIRECTS {
        match route.target {
            RouteTarget::View(_) => return Some(route),
            RouteTarget::Redirect(to) => route = find(to)?,
        }
    }
    None
}

/// Sidebar entries in declaration order
pub fn sidebar() -> impl Iterator<Item = &'static Route> {
    all().filter(|route| route.in_sidebar())
}
