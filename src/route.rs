//! Page routes
//!
//! The paths page consumers navigate between. Only `TodoDetail` carries
//! data; it is resolved against the store by `App::resolve`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` - status overview
    Home,
    /// `/create` - new todo form
    Create,
    /// `/todo/:id`
    TodoDetail { id: u64 },
    /// `/overview` - full list
    Overview,
}

impl Route {
    /// Parse a URL path. Unknown paths and non-numeric ids yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/create" => Some(Route::Create),
            "/overview" => Some(Route::Overview),
            _ => {
                let id = trimmed.strip_prefix("/todo/")?;
                id.parse().ok().map(|id| Route::TodoDetail { id })
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::TodoDetail { id } => format!("/todo/{}", id),
            Route::Overview => "/overview".to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Create => "create",
            Route::TodoDetail { .. } => "todo-detail",
            Route::Overview => "overview",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
