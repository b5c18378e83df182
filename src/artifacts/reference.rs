//! Reference name validation
//!
//! A reference is whatever `--reference` names: a branch, a tag, a raw ref
//! file like `HEAD`, or a full commit id. Names are validated against git's
//! ref-name rules before any filesystem probing, so garbage input fails fast
//! instead of producing confusing "not found" errors.

use crate::artifacts::objects::object_id::ObjectId;

pub const INVALID_REFERENCE_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceName(String);

impl ReferenceName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("reference name cannot be empty");
        }

        // Full commit ids are hex-only and pass the ref-name rules anyway,
        // but make the intent explicit.
        if ObjectId::is_full_hex(&name) {
            return Ok(Self(name));
        }

        let re = regex::Regex::new(INVALID_REFERENCE_NAME_REGEX)?;
        if re.is_match(&name) {
            anyhow::bail!("invalid reference name: {}", name);
        }

        Ok(Self(name))
    }

    pub fn is_commit_id(&self) -> bool {
        ObjectId::is_full_hex(&self.0)
    }
}

impl AsRef<str> for ReferenceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
