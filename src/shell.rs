//! Quoting for branch names that end up on a printed command line.

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Quote a branch name for use as a POSIX shell word.
///
/// Names made only of `[A-Za-z0-9._/-]` are returned untouched, which covers
/// almost every real branch. Anything else is single-quoted with embedded
/// single quotes closed, escaped and reopened.
pub fn quote_branch(name: &str) -> String {
    if !name.is_empty() && name.chars().all(is_safe) {
        return name.to_string();
    }
    format!("'{}'", name.replace('\'', "'\\''"))
}

/// Quote a branch name followed by a revision suffix such as `~1`.
///
/// The suffix stays outside the quotes so the shell concatenates the two.
pub fn quote_revision(name: &str, suffix: &str) -> String {
    format!("{}{suffix}", quote_branch(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_branch_names_pass_through() {
        assert_eq!(quote_branch("main"), "main");
        assert_eq!(quote_branch("feature/login-form"), "feature/login-form");
        assert_eq!(quote_branch("release_1.2"), "release_1.2");
    }

    #[test]
    fn names_with_shell_metacharacters_are_quoted() {
        assert_eq!(quote_branch("fix$HOME"), "'fix$HOME'");
        assert_eq!(quote_branch("a&b"), "'a&b'");
        assert_eq!(quote_branch("topic#1"), "'topic#1'");
    }

    #[test]
    fn embedded_single_quotes_are_escaped() {
        assert_eq!(quote_branch("bob's"), "'bob'\\''s'");
    }

    #[test]
    fn empty_name_becomes_empty_word() {
        assert_eq!(quote_branch(""), "''");
    }

    #[test]
    fn revision_suffix_stays_unquoted() {
        assert_eq!(quote_revision("feature", "~1"), "feature~1");
        assert_eq!(quote_revision("a&b", "~1"), "'a&b'~1");
    }
}
