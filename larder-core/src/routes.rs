use std::fmt;

pub const LIST_PATH: &str = "/recipes";
pub const CREATE_PATH: &str = "/recipes/new";

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    Create,
    Detail(String),
}

impl Route {
    /// Map a path to a route. Anything unrecognized, including `/`, lands on the list.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["recipes"] => Route::List,
            ["recipes", "new"] => Route::Create,
            ["recipes", id] => Route::Detail((*id).to_string()),
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Create => CREATE_PATH.to_string(),
            Route::Detail(id) => format!("{LIST_PATH}/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
