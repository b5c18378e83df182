/// Mode of a tree entry, parsed from the octal prefix of each entry.
///
/// Symlinks are stored as blobs whose content is the link target, so they
/// compare like any other file. Gitlinks (submodules) point at commits in a
/// foreign repository and carry no readable content here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Regular,
    Executable,
    Symlink,
    Directory,
    Gitlink,
}

impl EntryMode {
    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let mode = u32::from_str_radix(mode, 8)
            .map_err(|_| anyhow::anyhow!("Invalid octal entry mode: {}", mode))?;

        match mode {
            0o100644 => Ok(EntryMode::Regular),
            0o100755 => Ok(EntryMode::Executable),
            0o120000 => Ok(EntryMode::Symlink),
            0o040000 => Ok(EntryMode::Directory),
            0o160000 => Ok(EntryMode::Gitlink),
            other => Err(anyhow::anyhow!("Unknown entry mode: {:o}", other)),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn is_gitlink(&self) -> bool {
        matches!(self, EntryMode::Gitlink)
    }
}
