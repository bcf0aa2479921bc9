mod credentials;
mod db;

pub use credentials::{CredentialError, CredentialService};
pub use db::{create_pool, run_migrations};
