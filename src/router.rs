//! Route table and navigation guard.
//!
//! ARCHITECTURE
//! ============
//! The table is static data, and matching, guarding, and redirect resolution
//! are pure functions over it. `app::RouteGuard` feeds the live location and
//! session into `navigate` so the same rules drive the Leptos router.
//!
//! Order of evaluation for one navigation: resolve the path, run `guard`, then
//! follow the matched route's redirect (guarding the redirect target again).
//! An unauthenticated visit to `/` therefore lands on `/login`, not `/chat`.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::state::auth::Session;

/// Upper bound on guard/redirect hops for a single navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Named routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Chat,
    Knowledge,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Chat => "Chat",
            Self::Knowledge => "Knowledge",
        }
    }
}

/// Views a route can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    MainLayout,
    Chat,
    Knowledge,
}

/// One entry of the static route table.
#[derive(Debug)]
pub struct RouteEntry {
    /// Absolute for top-level entries, relative to the parent for children.
    pub path: &'static str,
    pub name: Option<RouteName>,
    pub view: Option<View>,
    /// Absolute path to continue to once the guard has passed.
    pub redirect: Option<&'static str>,
    pub children: &'static [RouteEntry],
}

/// Application routes. Chat and knowledge render inside the layout shell.
pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/login",
        name: Some(RouteName::Login),
        view: Some(View::Login),
        redirect: None,
        children: &[],
    },
    RouteEntry {
        path: "/",
        name: None,
        view: Some(View::MainLayout),
        redirect: None,
        children: &[
            RouteEntry {
                path: "",
                name: None,
                view: None,
                redirect: Some("/chat"),
                children: &[],
            },
            RouteEntry {
                path: "chat",
                name: Some(RouteName::Chat),
                view: Some(View::Chat),
                redirect: None,
                children: &[],
            },
            RouteEntry {
                path: "knowledge",
                name: Some(RouteName::Knowledge),
                view: Some(View::Knowledge),
                redirect: None,
                children: &[],
            },
        ],
    },
];

/// A path matched against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// Canonical full path of the matched entry.
    pub path: String,
    pub name: Option<RouteName>,
    /// Views from the outermost layout inward.
    pub views: Vec<View>,
    pub redirect: Option<&'static str>,
}

/// Outcome of `resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    /// Carries the normalized path that failed to match.
    NotFound(String),
}

impl Resolution {
    pub fn name(&self) -> Option<RouteName> {
        match self {
            Self::Matched(m) => m.name,
            Self::NotFound(_) => None,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Matched(m) => &m.path,
            Self::NotFound(path) => path,
        }
    }
}

/// Guard verdict for a single navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(RouteName),
}

/// Where a navigation ends up after guarding and redirects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Landing {
    Render(RouteMatch),
    NotFound(String),
}

impl Landing {
    pub fn path(&self) -> &str {
        match self {
            Self::Render(m) => &m.path,
            Self::NotFound(path) => path,
        }
    }

    pub fn name(&self) -> Option<RouteName> {
        match self {
            Self::Render(m) => m.name,
            Self::NotFound(_) => None,
        }
    }
}

/// Strip query and fragment, ensure a leading slash, and drop a trailing one.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

fn join_path(base: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_owned();
    }
    if child.is_empty() {
        return base.to_owned();
    }
    if base.ends_with('/') {
        format!("{base}{child}")
    } else {
        format!("{base}/{child}")
    }
}

fn match_entries(entries: &'static [RouteEntry], base: &str, outer: &[View], target: &str) -> Option<RouteMatch> {
    for entry in entries {
        let full = join_path(base, entry.path);
        let mut views = outer.to_vec();
        views.extend(entry.view);

        // Children win over their parent for the same path.
        if let Some(found) = match_entries(entry.children, &full, &views, target) {
            return Some(found);
        }
        let routable = entry.view.is_some() || entry.redirect.is_some();
        if routable && full.eq_ignore_ascii_case(target) {
            return Some(RouteMatch { path: full, name: entry.name, views, redirect: entry.redirect });
        }
    }
    None
}

/// Match `path` against the route table.
pub fn resolve(path: &str) -> Resolution {
    let target = normalize_path(path);
    match match_entries(ROUTES, "", &[], &target) {
        Some(m) => Resolution::Matched(m),
        None => Resolution::NotFound(target),
    }
}

fn find_named(entries: &'static [RouteEntry], base: &str, name: RouteName) -> Option<String> {
    entries.iter().find_map(|entry| {
        let full = join_path(base, entry.path);
        if entry.name == Some(name) {
            return Some(full);
        }
        find_named(entry.children, &full, name)
    })
}

/// Full path of a named route.
pub fn path_for(name: RouteName) -> Option<String> {
    find_named(ROUTES, "", name)
}

/// Allow navigation unless the target is not `Login` and nobody is signed in.
pub fn guard(to: &Resolution, _from: Option<&Resolution>, session: &Session) -> GuardDecision {
    if to.name() != Some(RouteName::Login) && !session.is_authenticated() {
        GuardDecision::Redirect(RouteName::Login)
    } else {
        GuardDecision::Proceed
    }
}

fn resolve_named(name: RouteName) -> Resolution {
    path_for(name).map_or_else(|| Resolution::NotFound(name.as_str().to_owned()), |p| resolve(&p))
}

/// Resolve `path`, guard it, and follow redirects to the final landing.
pub fn navigate(path: &str, session: &Session) -> Landing {
    let mut target = resolve(path);
    for _ in 0..=MAX_REDIRECTS {
        if let GuardDecision::Redirect(name) = guard(&target, None, session) {
            target = resolve_named(name);
            continue;
        }
        match target {
            Resolution::NotFound(missing) => return Landing::NotFound(missing),
            Resolution::Matched(m) => match m.redirect {
                Some(next) => target = resolve(next),
                None => return Landing::Render(m),
            },
        }
    }
    Landing::NotFound(normalize_path(path))
}
