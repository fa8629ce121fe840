// Platform probe

/// Identifier returned when the platform cannot be determined.
pub const UNKNOWN: &str = "unknown";

/// The current platform, e.g. `"windows"`, `"linux"` or `"darwin"`.
pub fn platform() -> String {
    normalize(std::env::consts::OS)
}

/// Maps a raw OS name onto the identifiers used by the platform guards.
///
/// Only the first word is kept and it is lowercased; Windows and macOS
/// spellings collapse to `"windows"` and `"darwin"`.
pub fn normalize(os: &str) -> String {
    let Some(first) = os.split_whitespace().next() else {
        return UNKNOWN.to_string();
    };
    match first.to_ascii_lowercase().as_str() {
        "win32" | "win64" | "windows" => "windows".to_string(),
        "macos" | "darwin" | "macintel" => "darwin".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("windows"), "windows");
        assert_eq!(normalize("Win32"), "windows");
        assert_eq!(normalize("macos"), "darwin");
        assert_eq!(normalize("Linux x86_64"), "linux");
        assert_eq!(normalize("freebsd"), "freebsd");
        assert_eq!(normalize(""), UNKNOWN);
        assert_eq!(normalize("   "), UNKNOWN);
    }

    #[test]
    fn test_platform_is_normalized() {
        let current = platform();
        assert!(!current.is_empty());
        assert_eq!(normalize(&current), current);
        #[cfg(target_os = "linux")]
        assert_eq!(current, "linux");
        #[cfg(windows)]
        assert_eq!(current, "windows");
    }
}
