// ─── Version Comparison ───
// Decides whether a remote modpack version is an upgrade over the local one.

/// Version reported when no modpack is installed.
pub const NOT_INSTALLED: &str = "0.0.0";

/// Returns `true` when `latest` should replace `current`.
///
/// Rules, in order: equal (ignoring a leading `v`) is never newer; anything is
/// newer than [`NOT_INSTALLED`]; [`NOT_INSTALLED`] is never newer; otherwise the
/// dotted components are compared numerically, missing ones counting as `0`.
pub fn is_newer(latest: &str, current: &str) -> bool {
    let latest = strip_prefix(latest);
    let current = strip_prefix(current);

    if latest == current {
        return false;
    }
    if current == NOT_INSTALLED {
        return true;
    }
    if latest == NOT_INSTALLED {
        return false;
    }

    let latest_parts = components(latest);
    let current_parts = components(current);
    let len = latest_parts.len().max(current_parts.len());

    for i in 0..len {
        let l = latest_parts.get(i).copied().unwrap_or(0);
        let c = current_parts.get(i).copied().unwrap_or(0);
        if l != c {
            return l > c;
        }
    }

    false
}

fn strip_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

fn components(version: &str) -> Vec<u64> {
    version.split('.').map(parse_component).collect()
}

/// Leading digits of a component; anything without them counts as `0`.
fn parse_component(part: &str) -> u64 {
    let digits: &str = {
        let trimmed = part.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    digits.parse().unwrap_or(0)
}
