use std::path::{Component, Path};

use serde::Serialize;

/// A remote mod file to place in the mods directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModFileEntry {
    pub name: String,
    pub download_url: String,
}

pub fn is_jar_name(name: &str) -> bool {
    name.ends_with(".jar")
}

/// A name is written to disk as `<mods>/<name>`, so it must be exactly one
/// normal path component.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_only() {
        assert!(is_plain_file_name("sodium-0.5.jar"));
        assert!(is_plain_file_name("Just Enough Items.jar"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name("../evil.jar"));
        assert!(!is_plain_file_name("sub/dir.jar"));
        assert!(!is_plain_file_name("..\\evil.jar"));
        assert!(!is_plain_file_name("/abs.jar"));
    }

    #[test]
    fn jar_suffix_is_exact() {
        assert!(is_jar_name("sodium.jar"));
        assert!(!is_jar_name("sodium.jar.disabled"));
        assert!(!is_jar_name("options.txt"));
    }
}
