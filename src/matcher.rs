/*!
 * Include/exclude pattern matching
 *
 * Patterns containing a `/` are matched against the path relative to the
 * scan root, all others against the file name alone. Matching follows
 * shell `fnmatch` rules: `*` and `?` never cross a `/`, and there is no
 * recursive `**`.
 */

use glob::{MatchOptions, Pattern};
use log::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled pattern
#[derive(Debug, Clone)]
struct FilePattern {
    /// Matched against the relative path instead of the file name
    path_bound: bool,
    /// `None` when the pattern is malformed; it then matches nothing
    glob: Option<Pattern>,
}

impl FilePattern {
    fn new(raw: &str) -> Self {
        let glob = match to_glob_syntax(raw).map(|p| Pattern::new(&p)) {
            Some(Ok(glob)) => Some(glob),
            Some(Err(e)) => {
                debug!("Pattern {:?} is malformed and will never match: {}", raw, e);
                None
            }
            None => {
                debug!("Pattern {:?} ends in a lone escape and will never match", raw);
                None
            }
        };

        Self {
            path_bound: raw.contains('/'),
            glob,
        }
    }

    fn matches(&self, full_path: &str, file_name: &str) -> bool {
        let candidate = if self.path_bound { full_path } else { file_name };
        self.glob
            .as_ref()
            .is_some_and(|glob| glob.matches_with(candidate, MATCH_OPTIONS))
    }
}

/// Rewrite shell-style syntax into what the `glob` crate understands:
/// star runs collapse into one `*`, `[^...]` negation becomes `[!...]` and
/// a backslash escape outside a class becomes a literal.
///
/// Returns `None` for a pattern ending in an unescaped `\`.
fn to_glob_syntax(pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '*' if !in_class => {
                out.push('*');
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('!');
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '\\' if !in_class => match chars.next()? {
                escaped @ ('*' | '?' | '[') => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                escaped => out.push(escaped),
            },
            _ => out.push(c),
        }
    }

    Some(out)
}

/// Decides which files are selected
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    include: Vec<FilePattern>,
    exclude: Vec<FilePattern>,
}

impl Matcher {
    /// Compile both pattern lists, keeping their order
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include.iter().map(|p| FilePattern::new(p.as_ref())).collect(),
            exclude: exclude.iter().map(|p| FilePattern::new(p.as_ref())).collect(),
        }
    }

    /// Whether the file at `rel_path` (relative to the scan root, `/`-separated) is selected.
    ///
    /// Exclude patterns are checked first and the first match rejects the
    /// file. With no include patterns every remaining file is selected,
    /// otherwise at least one include pattern has to match.
    pub fn is_included(&self, rel_path: &str) -> bool {
        let file_name = base_name(rel_path);

        if self.exclude.iter().any(|p| p.matches(rel_path, file_name)) {
            return false;
        }

        if self.include.is_empty() {
            return true;
        }

        self.include.iter().any(|p| p.matches(rel_path, file_name))
    }
}

/// Whether `pattern` matches, against `full_path` if it contains a `/`, else against `file_name`
pub fn matches(pattern: &str, full_path: &str, file_name: &str) -> bool {
    FilePattern::new(pattern).matches(full_path, file_name)
}

/// One-shot form of [`Matcher::is_included`]
pub fn is_included<S: AsRef<str>>(rel_path: &str, include: &[S], exclude: &[S]) -> bool {
    Matcher::new(include, exclude).is_included(rel_path)
}

/// Final component of a `/`-separated path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn name_pattern_ignores_directories() {
        assert!(matches("*.go", "src/main.go", "main.go"));
        assert!(matches("*.go", "a/b/c/main.go", "main.go"));
        assert!(!matches("*.go", "src/main.rs", "main.rs"));
    }

    #[test]
    fn path_pattern_is_anchored_to_root() {
        assert!(matches("src/*.go", "src/main.go", "main.go"));
        assert!(!matches("src/*.go", "lib/main.go", "main.go"));
        assert!(!matches("src/*.go", "src/cmd/main.go", "main.go"));
    }

    #[test]
    fn star_does_not_cross_separator() {
        assert!(!matches("*/*.go", "a/b/main.go", "main.go"));
        assert!(matches("*/*/*.go", "a/b/main.go", "main.go"));
        // no recursive globstar
        assert!(!matches("src/**/*.go", "src/a/b/main.go", "main.go"));
        assert!(matches("src/**/*.go", "src/a/main.go", "main.go"));
    }

    #[test]
    fn question_mark_and_classes() {
        assert!(matches("file?.txt", "file1.txt", "file1.txt"));
        assert!(!matches("file?.txt", "file10.txt", "file10.txt"));
        assert!(matches("[ab].rs", "a.rs", "a.rs"));
        assert!(!matches("[ab].rs", "c.rs", "c.rs"));
        assert!(matches("[a-c].rs", "b.rs", "b.rs"));
        assert!(matches("[!ab].rs", "c.rs", "c.rs"));
        assert!(matches("[^ab].rs", "c.rs", "c.rs"));
        assert!(!matches("[^ab].rs", "a.rs", "a.rs"));
    }

    #[test]
    fn leading_dot_matches_star() {
        assert!(matches("*", ".env", ".env"));
        assert!(matches("*rc", ".bashrc", ".bashrc"));
    }

    #[test]
    fn malformed_pattern_never_matches() {
        assert!(!matches("[abc", "[abc", "[abc"));
        assert!(!matches("src/[", "src/[", "["));
        // and it does not poison the rest of the list
        assert!(is_included("main.rs", &["[abc", "*.rs"], NONE));
    }

    #[test]
    fn empty_include_selects_everything_not_excluded() {
        assert!(is_included("README.md", NONE, NONE));
        assert!(is_included("deep/nested/file.bin", NONE, &["*.txt"]));
        assert!(!is_included("notes.txt", NONE, &["*.txt"]));
    }

    #[test]
    fn exclude_wins_over_include() {
        let include = ["*.rs", "src/*"];
        let exclude = ["lib.rs"];
        assert!(!is_included("src/lib.rs", &include, &exclude));
        assert!(is_included("src/main.rs", &include, &exclude));

        let matcher = Matcher::new(&["src/lib.rs"], &["src/*"]);
        assert!(!matcher.is_included("src/lib.rs"));
    }

    #[test]
    fn unmatched_include_selects_nothing() {
        let matcher = Matcher::new(&["*.zig"], NONE);
        assert!(!matcher.is_included("main.rs"));
        assert!(!matcher.is_included("src/lib.rs"));
    }

    #[test]
    fn base_name_of_paths() {
        assert_eq!(base_name("a/b/c.txt"), "c.txt");
        assert_eq!(base_name("c.txt"), "c.txt");
    }

    #[test]
    fn glob_syntax_rewrite() {
        assert_eq!(to_glob_syntax("a**b").as_deref(), Some("a*b"));
        assert_eq!(to_glob_syntax("[^x]*").as_deref(), Some("[!x]*"));
        assert_eq!(to_glob_syntax("[*]").as_deref(), Some("[*]"));
        assert_eq!(to_glob_syntax("\\*\\x").as_deref(), Some("[*]x"));
        assert_eq!(to_glob_syntax("abc\\"), None);
    }

    #[test]
    fn backslash_escapes_metacharacters() {
        assert!(matches("\\*.txt", "*.txt", "*.txt"));
        assert!(!matches("\\*.txt", "a.txt", "a.txt"));
        assert!(!matches("\\*.txt", "\\a.txt", "\\a.txt"));
        assert!(matches("a\\?", "a?", "a?"));
        assert!(!matches("a\\?", "ab", "ab"));
        assert!(matches("\\[x]", "[x]", "[x]"));
        assert!(matches("\\\\n", "\\n", "\\n"));
        assert!(matches("src/\\*", "src/*", "*"));
    }

    #[test]
    fn trailing_escape_never_matches() {
        assert!(!matches("abc\\", "abc\\", "abc\\"));
        assert!(!matches("abc\\", "abc", "abc"));
    }
}
