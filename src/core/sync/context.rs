use reqwest::Client;

use super::SyncState;
use crate::core::config::ConfigStore;
use crate::core::paths::GamePaths;
use crate::core::repository::RemoteEndpoints;

/// Everything one engine operation needs, borrowed from its owner.
///
/// Operations never reach for global state; two contexts with different
/// paths or endpoints can run side by side.
#[derive(Clone, Copy)]
pub struct SyncContext<'a> {
    pub paths: &'a GamePaths,
    pub http_client: &'a Client,
    pub endpoints: &'a RemoteEndpoints,
    pub config: &'a ConfigStore,
    pub state: &'a SyncState,
}
