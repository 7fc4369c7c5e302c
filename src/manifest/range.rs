//! Classification of dependency range strings.
//!
//! A dependency value is either one or more space-separated range
//! descriptors, or a reference that is not a version at all (a tarball URL,
//! a VCS location, a local path, ...). This module only tells those apart;
//! it never evaluates a range against a version.

use std::fmt;

/// What a dependency value refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSpec {
    /// Version range descriptors, as alternation groups separated by `||`.
    ///
    /// Each group is a list of descriptors that must all hold
    /// (`">=1.2.0 <2"` is one group of two). A hyphen range
    /// (`"1.0.0 - 2.0.0"`) stays a single descriptor. No groups means any
    /// version (`""`).
    Range(Vec<Vec<String>>),
    /// A dist-tag such as `latest` or `next`.
    Tag(String),
    /// An `http(s)://` tarball URL.
    Tarball(String),
    /// A git repository (`git+https://...`, `github:user/repo`, `user/repo`).
    Vcs(String),
    /// A path on disk (`file:`, `link:`, `./`, `../`, `/`, `~/`).
    Local(String),
    /// A workspace protocol reference (`workspace:*`).
    Workspace(String),
    /// `npm:other-name@range`.
    Alias { name: String, spec: Box<RangeSpec> },
}

const VCS_PREFIXES: &[&str] = &[
    "git+",
    "git://",
    "github:",
    "gitlab:",
    "bitbucket:",
    "gist:",
];

const LOCAL_PREFIXES: &[&str] = &["file:", "link:", "./", "../", "/", "~/"];

impl RangeSpec {
    /// Classifies a dependency value.
    ///
    /// # Example
    ///
    /// ```
    /// use pkgshape::manifest::RangeSpec;
    ///
    /// assert_eq!(RangeSpec::parse("^1.2.0").kind(), "range");
    /// assert_eq!(RangeSpec::parse("github:user/repo#main").kind(), "vcs");
    /// assert_eq!(RangeSpec::parse("latest").kind(), "tag");
    /// ```
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();

        if let Some(rest) = value.strip_prefix("npm:") {
            return parse_alias(rest);
        }
        if value.starts_with("workspace:") {
            return RangeSpec::Workspace(value.to_string());
        }
        if VCS_PREFIXES.iter().any(|p| value.starts_with(p)) {
            return RangeSpec::Vcs(value.to_string());
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            return RangeSpec::Tarball(value.to_string());
        }
        if LOCAL_PREFIXES.iter().any(|p| value.starts_with(p)) {
            return RangeSpec::Local(value.to_string());
        }
        if is_github_shorthand(value) {
            return RangeSpec::Vcs(value.to_string());
        }
        if is_tag(value) {
            return RangeSpec::Tag(value.to_string());
        }

        RangeSpec::Range(
            value
                .split("||")
                .map(str::trim)
                .filter(|group| !group.is_empty())
                .map(split_descriptors)
                .collect(),
        )
    }

    /// Short label for the kind of reference.
    pub fn kind(&self) -> &'static str {
        match self {
            RangeSpec::Range(_) => "range",
            RangeSpec::Tag(_) => "tag",
            RangeSpec::Tarball(_) => "tarball",
            RangeSpec::Vcs(_) => "vcs",
            RangeSpec::Local(_) => "local",
            RangeSpec::Workspace(_) => "workspace",
            RangeSpec::Alias { .. } => "alias",
        }
    }

    /// Returns true for `""`, `"*"`, `"x"` and friends.
    pub fn is_any(&self) -> bool {
        match self {
            RangeSpec::Range(groups) => {
                groups.is_empty()
                    || groups
                        .iter()
                        .any(|g| g.len() == 1 && matches!(g[0].as_str(), "*" | "x" | "X"))
            }
            _ => false,
        }
    }

    /// Returns true if resolving this spec needs the registry.
    pub fn is_registry(&self) -> bool {
        match self {
            RangeSpec::Range(_) | RangeSpec::Tag(_) => true,
            RangeSpec::Alias { spec, .. } => spec.is_registry(),
            _ => false,
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Range(groups) => {
                let text: Vec<String> = groups.iter().map(|g| g.join(" ")).collect();
                write!(f, "{}", text.join(" || "))
            }
            RangeSpec::Tag(s)
            | RangeSpec::Tarball(s)
            | RangeSpec::Vcs(s)
            | RangeSpec::Local(s)
            | RangeSpec::Workspace(s) => write!(f, "{s}"),
            RangeSpec::Alias { name, spec } => write!(f, "npm:{name}@{spec}"),
        }
    }
}

fn parse_alias(rest: &str) -> RangeSpec {
    // A scoped name starts with '@', so the version separator is the last '@' after it.
    let split_at = rest
        .char_indices()
        .skip(1)
        .filter(|(_, c)| *c == '@')
        .map(|(i, _)| i)
        .last();
    let (name, range) = match split_at {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };
    RangeSpec::Alias {
        name: name.to_string(),
        spec: Box::new(RangeSpec::parse(range)),
    }
}

fn split_descriptors(group: &str) -> Vec<String> {
    let tokens: Vec<&str> = group.split_whitespace().collect();
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if i + 2 < tokens.len() && tokens[i + 1] == "-" {
            out.push(format!("{} - {}", tokens[i], tokens[i + 2]));
            i += 3;
        } else {
            out.push(tokens[i].to_string());
            i += 1;
        }
    }
    out
}

/// `user/repo` or `user/repo#ref`, but not a scoped package or path.
fn is_github_shorthand(value: &str) -> bool {
    let repo = value.split('#').next().unwrap_or(value);
    let mut parts = repo.split('/');
    let (Some(user), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let valid = |s: &str| {
        !s.is_empty()
            && !s.starts_with('.')
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    valid(user) && valid(name)
}

/// A single identifier that cannot be read as a range descriptor.
fn is_tag(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() || matches!(value, "x" | "X") {
        return false;
    }
    // v1.2.3 is a version with a prefix, not a tag.
    if first == 'v' && value[1..].starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
