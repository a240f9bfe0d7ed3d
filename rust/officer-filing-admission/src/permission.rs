use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Resource key under which officer filing permissions are granted.
pub const COMPANY_OFFICERS: &str = "company_officers";

/// Fine-grained actions a token may hold over a resource key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Create new records.
    Create,
    /// Delete records.
    Delete,
    /// Update existing records.
    Update,
    /// Read protected fields of records.
    ReadProtected,
}

impl Action {
    /// Every action an officer filing requires, in evaluation order.
    pub const REQUIRED: [Action; 4] = [
        Action::Create,
        Action::Delete,
        Action::Update,
        Action::ReadProtected,
    ];

    /// Wire name of the action inside a permissions header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Delete => "delete",
            Action::Update => "update",
            Action::ReadProtected => "readprotected",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability-query object resolved from the caller's token.
///
/// Upstream middleware attaches an implementation to each request; the
/// permission gate only ever asks yes/no questions of it.
pub trait TokenPermissions: Send + Sync {
    /// Does the token grant `action` over `key`?
    fn has_permission(&self, key: &str, action: Action) -> bool;
}

/// [`TokenPermissions`] parsed from a permissions header.
///
/// Each whitespace separated segment of the form `key=action,action` grants
/// the listed actions over `key`. Segments without `=` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPermissionSet {
    grants: BTreeMap<String, BTreeSet<String>>,
}

impl TokenPermissionSet {
    /// Parse the grants out of a raw header value.
    pub fn parse(raw: &str) -> Self {
        let mut grants: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (key, actions) in raw
            .split_whitespace()
            .filter_map(|segment| segment.split_once('='))
            .filter(|(key, _)| !key.is_empty())
        {
            let mut actions = actions
                .split(',')
                .filter(|action| !action.is_empty())
                .map(str::to_owned)
                .peekable();

            if actions.peek().is_some() {
                grants.entry(key.to_owned()).or_default().extend(actions);
            }
        }

        Self { grants }
    }

    /// Actions granted over `key`, if any.
    pub fn actions(&self, key: &str) -> impl Iterator<Item = &str> {
        self.grants
            .get(key)
            .into_iter()
            .flat_map(|actions| actions.iter().map(String::as_str))
    }
}

impl TokenPermissions for TokenPermissionSet {
    fn has_permission(&self, key: &str, action: Action) -> bool {
        self.grants
            .get(key)
            .is_some_and(|actions| actions.contains(action.as_str()))
    }
}
