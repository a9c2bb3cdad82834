//! Build date and commit embedded by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `angry-flappy <date> (<commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!("angry-flappy {} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_date() {
        let line = version_line();
        assert!(line.starts_with("angry-flappy "));
        assert!(line.contains(BUILD_DATE));
    }
}
