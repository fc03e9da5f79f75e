pub mod directory;
pub mod entry;
pub mod resolver;

pub use directory::{clear_jar_files, ensure_dir};
pub use entry::ModFileEntry;
pub use resolver::{list_mod_files, ContentsApiListing, ContentsEntry, ManifestListing, ModListSource};
