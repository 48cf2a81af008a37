use std::sync::LazyLock;

use regex::Regex;

/// `version='…'` / `version = "…"` anywhere on a line, with the closing
/// quote matching the opening one.
static VERSION_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bversion[ \t]*=[ \t]*(?:'(?P<single>[^'\n]*)'|"(?P<double>[^"\n]*)")"#)
        .expect("version literal regex is valid")
});

/// Accepted release tags. Deliberately loose: it also accepts the empty string.
static PERMISSIVE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[v0-9.]*$").expect("release tag regex is valid")
});

/// A release tag outside `[v0-9.]*`. Non-fatal: the rewrite is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("release tag {tag:?} does not match [v0-9.]*; version left untouched")]
pub struct PatternMismatch {
    pub tag: String,
}

/// Outcome of [`rewrite_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRewrite {
    /// The version literal was replaced; `content` is the new file text.
    Replaced { previous: String, content: String },
    /// The file already carries the requested version.
    Unchanged,
    /// The tag failed the permissive filter.
    Skipped(PatternMismatch),
    /// No `version=` line was found.
    NoVersionLine,
}

pub fn is_permissive_version(tag: &str) -> bool {
    PERMISSIVE_TAG.is_match(tag)
}

/// Replace the first `version='…'` literal in `content` with `tag`.
///
/// `python_version=` and `__version__ =` are not version literals.
///
/// Quote style and surrounding whitespace are preserved; nothing else in the
/// file changes.
pub fn rewrite_version(content: &str, tag: &str) -> VersionRewrite {
    if !is_permissive_version(tag) {
        return VersionRewrite::Skipped(PatternMismatch {
            tag: tag.to_owned(),
        });
    }

    let Some(value) = VERSION_LITERAL
        .captures(content)
        .and_then(|caps| caps.name("single").or_else(|| caps.name("double")))
    else {
        return VersionRewrite::NoVersionLine;
    };

    let previous = value.as_str().to_owned();
    if previous == tag {
        return VersionRewrite::Unchanged;
    }

    let mut rewritten = String::with_capacity(content.len() + tag.len());
    rewritten.push_str(&content[..value.start()]);
    rewritten.push_str(tag);
    rewritten.push_str(&content[value.end()..]);

    VersionRewrite::Replaced {
        previous,
        content: rewritten,
    }
}
