//! Repository URL normalization

/// Turn an npm `repository.url` into a plain URL.
///
/// Strips one leading `git+` and one trailing `.git`. Nothing else is
/// validated or rewritten.
pub fn normalize_repository_url(raw: &str) -> String {
    let url = raw.strip_prefix("git+").unwrap_or(raw);
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_plus_https() {
        assert_eq!(
            normalize_repository_url("git+https://github.com/org/repo.git"),
            "https://github.com/org/repo"
        );
    }

    #[test]
    fn test_plain_https_unchanged() {
        assert_eq!(
            normalize_repository_url("https://github.com/org/repo"),
            "https://github.com/org/repo"
        );
    }

    #[test]
    fn test_only_one_affix_is_stripped() {
        assert_eq!(
            normalize_repository_url("git+git+ssh://host/x.git.git"),
            "git+ssh://host/x.git"
        );
    }

    #[test]
    fn test_git_protocol_is_not_rewritten() {
        assert_eq!(
            normalize_repository_url("git://github.com/org/repo.git"),
            "git://github.com/org/repo"
        );
    }
}
