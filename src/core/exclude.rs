//! Exclusion patterns
//!
//! A pattern is one of:
//! - an exact entry name (`node_modules`)
//! - a suffix glob (`*.pyc`, `*.min.js`)
//! - a root-relative path when it contains '/' (`src/generated`)

/// Patterns excluded unless `--no-default-excludes` is given
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "__pycache__",
    ".git",
    ".svn",
    "node_modules",
    ".venv",
    "venv",
    ".env",
    ".DS_Store",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "*.pyc",
    "*.pyo",
    "*.so",
    "*.dll",
    "*.exe",
    "*.jpg",
    "*.png",
    "*.gif",
    "*.ico",
    "*.min.js",
    "*.min.css",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Name(String),
    Suffix(String),
    Path(String),
}

impl Pattern {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(rest) = raw.strip_prefix('*') {
            if !rest.is_empty() && !rest.contains('*') {
                return Some(Pattern::Suffix(rest.to_string()));
            }
        }

        let trimmed = raw.trim_matches('/');
        if trimmed.contains('/') {
            Some(Pattern::Path(trimmed.to_string()))
        } else {
            Some(Pattern::Name(trimmed.to_string()))
        }
    }

    fn matches(&self, name: &str, relative: &str) -> bool {
        match self {
            Pattern::Name(n) => name == n,
            Pattern::Suffix(s) => name.ends_with(s.as_str()),
            Pattern::Path(p) => relative == p,
        }
    }
}

/// Set of exclusion patterns applied to both directories and files
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<Pattern>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in exclusion list
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.extend(DEFAULT_EXCLUDES.iter().copied());
        set
    }

    pub fn add(&mut self, raw: &str) {
        if let Some(pattern) = Pattern::parse(raw) {
            if !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
    }

    pub fn extend<'a>(&mut self, raw: impl IntoIterator<Item = &'a str>) {
        for r in raw {
            self.add(r);
        }
    }

    /// Check an entry by its file name and its '/'-separated path relative to root
    pub fn is_excluded(&self, name: &str, relative: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name, relative))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name() {
        let mut set = ExclusionSet::new();
        set.add("node_modules");
        assert!(set.is_excluded("node_modules", "web/node_modules"));
        assert!(!set.is_excluded("node_modules2", "node_modules2"));
    }

    #[test]
    fn test_suffix_glob() {
        let mut set = ExclusionSet::new();
        set.add("*.min.js");
        assert!(set.is_excluded("app.min.js", "static/app.min.js"));
        assert!(!set.is_excluded("app.js", "static/app.js"));
    }

    #[test]
    fn test_path_pattern() {
        let mut set = ExclusionSet::new();
        set.add("src/generated/");
        assert!(set.is_excluded("generated", "src/generated"));
        assert!(!set.is_excluded("generated", "lib/generated"));
    }

    #[test]
    fn test_blank_and_duplicate_patterns_ignored() {
        let mut set = ExclusionSet::new();
        set.extend(["", "  ", "dist", "dist"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bare_star_is_a_name() {
        let mut set = ExclusionSet::new();
        set.add("*");
        assert!(set.is_excluded("*", "*"));
        assert!(!set.is_excluded("main.rs", "main.rs"));
    }

    #[test]
    fn test_defaults() {
        let set = ExclusionSet::with_defaults();
        assert_eq!(set.len(), DEFAULT_EXCLUDES.len());
        assert!(set.is_excluded(".git", ".git"));
        assert!(set.is_excluded("mod.pyc", "pkg/mod.pyc"));
        assert!(!set.is_excluded("main.py", "main.py"));
    }
}
