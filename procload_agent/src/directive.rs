//! Route registration. The agent has one directive, `hello_world`, which
//! installs the content handler on a location.

use axum::{routing::get, Router};
use tracing::info;

use crate::handler::hello_world_handler;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    HelloWorld,
}

impl Directive {
    pub const fn name(self) -> &'static str {
        match self {
            Directive::HelloWorld => "hello_world",
        }
    }
}

/// Installs the host-load content handler on `location` (GET and HEAD).
pub fn hello_world(router: Router<AppState>, location: &str) -> Router<AppState> {
    router.route(location, get(hello_world_handler))
}

pub fn install(router: Router<AppState>, directive: Directive, location: &str) -> Router<AppState> {
    info!(location, directive = directive.name(), "installing handler");
    match directive {
        Directive::HelloWorld => hello_world(router, location),
    }
}

/// Builds the service router. Locations must be distinct and start with `/`
/// (`config::parse_args` guarantees both).
pub fn build_router(state: AppState, locations: &[(String, Directive)]) -> Router {
    locations
        .iter()
        .fold(Router::new(), |r, (loc, d)| install(r, *d, loc))
        .with_state(state)
}
