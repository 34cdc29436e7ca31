//! Token names.

use crate::error::{Error, Result};
use crate::set::fold_case;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

/// Separator between an owner scope and a token name.
pub const SCOPE_SEPARATOR: char = '/';

/// Characters reserved by token expression syntax.
const RESERVED_CHARS: &[char] = &['{', '}', ':', ',', '|'];

/// The validated name of a token.
///
/// Names compare and hash case-insensitively, so `Season` and `SEASON`
/// identify the same token.
#[derive(Clone)]
pub struct TokenName {
    name: String,
    folded: String,
}

impl TokenName {
    /// Validates and creates a token name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_segment(&name, &name)?;
        Ok(Self::from_valid(name))
    }

    /// Creates a name scoped to an owner, like `Owner.Mod/Season`.
    pub fn scoped(owner: &str, name: &str) -> Result<Self> {
        let full = format!("{}{}{}", owner, SCOPE_SEPARATOR, name);
        validate_segment(&full, owner)?;
        validate_segment(&full, name)?;
        Ok(Self::from_valid(full))
    }

    fn from_valid(name: String) -> Self {
        let folded = fold_case(&name);
        Self { name, folded }
    }

    /// Returns the name as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns the owner scope, if the name has one.
    pub fn owner(&self) -> Option<&str> {
        self.name.split_once(SCOPE_SEPARATOR).map(|(owner, _)| owner)
    }

    /// Returns the name without its owner scope.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(SCOPE_SEPARATOR)
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }

    /// Returns true if the name is scoped to `owner`, ignoring case.
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner().is_some_and(|o| fold_case(o) == fold_case(owner))
    }
}

fn validate_segment(full: &str, segment: &str) -> Result<()> {
    if segment.trim().is_empty() {
        return Err(Error::invalid_name(full, "name can't be empty"));
    }
    if segment.chars().any(char::is_whitespace) {
        return Err(Error::invalid_name(full, "name can't contain whitespace"));
    }
    if let Some(c) = segment.chars().find(|c| RESERVED_CHARS.contains(c) || *c == SCOPE_SEPARATOR) {
        return Err(Error::invalid_name(
            full,
            format!("name can't contain reserved character '{}'", c),
        ));
    }
    Ok(())
}

impl PartialEq for TokenName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for TokenName {}

impl Hash for TokenName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Debug for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenName({:?})", self.name)
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl TryFrom<&str> for TokenName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        TokenName::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        let name = TokenName::new("Season").unwrap();
        assert_eq!(name.as_str(), "Season");
        assert_eq!(name.owner(), None);
        assert_eq!(name.local_name(), "Season");
    }

    #[test]
    fn test_names_compare_ignoring_case() {
        assert_eq!(TokenName::new("Season").unwrap(), TokenName::new("SEASON").unwrap());
        assert_ne!(TokenName::new("Season").unwrap(), TokenName::new("Weather").unwrap());
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "   ", "Two Words", "a:b", "{Season}", "a,b", "a|b", "a/b"] {
            match TokenName::new(bad) {
                Err(Error::InvalidName { .. }) => {}
                other => panic!("expected InvalidName for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_scoped_name() {
        let name = TokenName::scoped("Example.Mod", "Season").unwrap();
        assert_eq!(name.as_str(), "Example.Mod/Season");
        assert_eq!(name.owner(), Some("Example.Mod"));
        assert_eq!(name.local_name(), "Season");
        assert!(name.is_owned_by("example.mod"));
        assert!(!name.is_owned_by("Other.Mod"));
    }

    #[test]
    fn test_scoped_name_rejects_bad_segments() {
        assert!(TokenName::scoped("", "Season").is_err());
        assert!(TokenName::scoped("Owner", "").is_err());
        assert!(TokenName::scoped("Own/er", "Season").is_err());
    }
}
