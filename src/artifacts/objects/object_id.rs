//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings. Loose objects live at
//! `.git/objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from its hexadecimal form.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Whether a string looks like a full object ID.
    pub fn is_full_hex(candidate: &str) -> bool {
        candidate.len() == OBJECT_ID_LENGTH && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Read an object ID from its binary form (20 bytes).
    ///
    /// Tree entries store object IDs packed; this reads 20 bytes and expands
    /// them back to the 40-character hex string.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in raw {
            hex40.push_str(&format!("{:02x}", byte));
        }

        Self::try_parse(hex40)
    }

    /// Convert to the loose-object path `XX/YYYY...` under `.git/objects`.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters, the standard git abbreviation.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
