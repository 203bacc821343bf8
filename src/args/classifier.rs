//! Argument classifier — remaining args → projects + composer args.

use std::ffi::{OsStr, OsString};

/// Keyword that starts a global command.
const GLOBAL: &str = "global";
/// Subcommand implied by the per-project plan.
const REQUIRE: &str = "require";

/// Characters that may start a version constraint besides a digit.
const VERSION_RANGE_CHARS: [char; 4] = ['^', '~', '<', '>'];

/// Projects to install, keyed by name, in the order they were first named.
///
/// Naming a project again replaces its version but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSet {
    entries: Vec<(String, String)>,
}

impl ProjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`. Returns the entry's index.
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) -> usize {
        let name = name.into();
        let version = version.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => {
                self.entries[index].1 = version;
                index
            }
            None => {
                self.entries.push((name, version));
                self.entries.len() - 1
            }
        }
    }

    /// Replace the version of the entry at `index`.
    fn set_version(&mut self, index: usize, version: String) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.1 = version;
        }
    }

    /// Version constraint for `name`; empty means unconstrained.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ProjectSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = ProjectSet::new();
        for (name, version) in iter {
            set.insert(name, version);
        }
        set
    }
}

/// Outcome of classifying the arguments left after option extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a `global require`: forward every argument to composer unchanged.
    Passthrough(Vec<OsString>),
    /// A `global require`, split into projects and the flags for composer.
    GlobalRequire {
        projects: ProjectSet,
        composer_args: Vec<OsString>,
    },
}

impl Classification {
    /// Projects to install (empty for passthrough).
    pub fn projects(&self) -> Option<&ProjectSet> {
        match self {
            Classification::Passthrough(_) => None,
            Classification::GlobalRequire { projects, .. } => Some(projects),
        }
    }
}

/// Whether `arg` looks like a composer version constraint.
///
/// Cheap heuristic: starts with a digit or one of `^ ~ < >`.
pub fn is_version(arg: &str) -> bool {
    arg.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || VERSION_RANGE_CHARS.contains(&c))
}

/// Split `vendor/name:1.0` (or `vendor/name=1.0`) into name and version.
///
/// The version is empty when no separator is present.
pub fn split_project(arg: &str) -> (String, String) {
    let normalized = arg.replace('=', ":");
    match normalized.split_once(':') {
        Some((name, version)) => (name.to_string(), version.to_string()),
        None => (normalized, String::new()),
    }
}

/// Whether `arg` is a flag for composer.
///
/// Checked on the raw bytes so flags that are not valid unicode are still
/// forwarded untouched.
fn is_flag(arg: &OsStr) -> bool {
    arg.as_encoded_bytes().first() == Some(&b'-')
}

/// Classify arguments.
///
/// Flags go to composer, `vendor/name[:version]` tokens name projects, a
/// bare version token applies to the last named project, and `global` /
/// `require` are consumed. Any other word means this is some other
/// composer command, and the whole argument list is passed through.
///
/// Composer package names and constraints are ASCII, so a non-flag token
/// that is not valid unicode counts as some other word.
pub fn classify(args: &[OsString]) -> Classification {
    let mut projects = ProjectSet::new();
    let mut composer_args = Vec::new();
    // Index of the project named by the latest project token. A re-named
    // project keeps its position, so this can differ from the last entry:
    // `a/b c/d a/b 2.0` attaches 2.0 to a/b, not c/d.
    let mut last_project: Option<usize> = None;
    let mut saw_global = false;

    for arg in args {
        if is_flag(arg) {
            composer_args.push(arg.clone());
            continue;
        }
        let Some(text) = arg.to_str() else {
            tracing::debug!(arg = ?arg, "non-unicode argument, passing through");
            return Classification::Passthrough(args.to_vec());
        };

        if text.contains('/') {
            let (name, version) = split_project(text);
            last_project = Some(projects.insert(name, version));
        } else if is_version(text) {
            match last_project {
                Some(index) => projects.set_version(index, text.to_string()),
                None => {
                    tracing::warn!(version = %text, "version given before any project, forwarding to composer");
                    composer_args.push(arg.clone());
                }
            }
        } else if text == GLOBAL {
            saw_global = true;
        } else if !(saw_global && text == REQUIRE) {
            tracing::debug!(command = %text, "not a global require, passing through");
            return Classification::Passthrough(args.to_vec());
        }
    }

    Classification::GlobalRequire {
        projects,
        composer_args,
    }
}
