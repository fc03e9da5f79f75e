pub mod gate;
pub mod patcher;

pub use gate::{check_version_compatibility, is_version_installed, VersionCheckResult};
pub use patcher::PatcherDescriptor;
