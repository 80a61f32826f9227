// Service layer for business logic
//
// Services sit between the HTTP handlers and storage. They own validation
// that must hold regardless of the caller and translate storage outcomes
// into the domain error taxonomy.

pub mod auth;
pub mod credentials;
pub mod note;
pub mod token;

pub use auth::AuthService;
pub use credentials::{CredentialStore, Credentials, NewIdentity};
pub use note::{NoteInput, NoteService};
pub use token::TokenIssuer;
