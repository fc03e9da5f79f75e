pub mod context;
pub mod engine;
pub mod phase;
pub mod progress;

pub use context::SyncContext;
pub use engine::{
    check_for_updates, download_and_install, get_modpack_info, uninstall_modpack, ModpackInfo,
};
pub use phase::{PhaseGuard, SyncPhase, SyncState};
pub use progress::DownloadProgress;
