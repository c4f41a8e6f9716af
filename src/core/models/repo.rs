//! Repository reference (`owner/name`)

use crate::core::error::InputError;

/// A repository on the tracker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Owning user or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a reference from its parts
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`
    ///
    /// Surrounding whitespace is ignored; anything other than exactly two
    /// non-empty segments is rejected.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            },
            _ => Err(InputError::InvalidRepository(trimmed.to_string())),
        }
    }

    /// Browser URL of the repository under `web_base`
    #[must_use]
    pub fn web_url(&self, web_base: &str) -> String {
        format!("{}/{}/{}", web_base.trim_end_matches('/'), self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
