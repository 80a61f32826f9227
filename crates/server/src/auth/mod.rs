// Authentication module
//
// - routes: register, login and profile endpoints (the auth gateway)
// - middleware: AuthUser extractor that gates every protected route

pub mod middleware;
pub mod routes;

pub use middleware::{AuthState, AuthUser};
pub use routes::{routes, AuthRoutesState};
