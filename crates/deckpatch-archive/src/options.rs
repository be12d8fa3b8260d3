use std::path::PathBuf;

/// Where mod images live, both inside mod archives and inside the game binary.
pub const DEFAULT_INTERNAL_PATH: &str = "resources/textures/2x";

const DEFAULT_PREFIX: &str = "deckpatch-mod-";

#[derive(Clone, Debug)]
pub struct StageOptions {
    /// Subpath the staged tree is expected to contain.
    pub internal_path: PathBuf,
    /// Name prefix for the staging directory.
    pub prefix: String,
    /// Parent of the staging directory; the system temp dir when unset.
    pub staging_parent: Option<PathBuf>,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            internal_path: PathBuf::from(DEFAULT_INTERNAL_PATH),
            prefix: DEFAULT_PREFIX.to_string(),
            staging_parent: None,
        }
    }
}

impl StageOptions {
    pub fn internal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.internal_path = path.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }
}
