pub mod compare;
pub mod descriptor;

pub use compare::{is_newer, NOT_INSTALLED};
pub use descriptor::VersionDescriptor;
