use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header and return the object type.
    ///
    /// The reader is left positioned at the first content byte.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut object_type = Vec::new();
        reader.read_until(b' ', &mut object_type)?;

        let object_type = String::from_utf8(object_type)?;
        let object_type = object_type.trim();

        // skip the size part
        let mut size = Vec::new();
        reader.read_until(b'\0', &mut size)?;

        ObjectType::try_from(object_type)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(anyhow::anyhow!("Unsupported object type: {}", other)),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
