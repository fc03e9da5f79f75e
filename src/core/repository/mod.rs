pub mod endpoints;
pub mod locator;

pub use endpoints::RemoteEndpoints;
pub use locator::RepositoryReference;
