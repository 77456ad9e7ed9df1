use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    path::PathBuf,
    sync::Arc,
};

/// Built-in single-row datasets that need no file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Apparel,
    Footwear,
}

impl Placeholder {
    pub const ALL: [Placeholder; 2] = [Placeholder::Apparel, Placeholder::Footwear];

    pub fn label(&self) -> &'static str {
        match self {
            Placeholder::Apparel => "Demo row: Apparel",
            Placeholder::Footwear => "Demo row: Footwear",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Placeholder::Apparel => "demo-apparel",
            Placeholder::Footwear => "demo-footwear",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

/// Where the current dataset comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DataSource {
    /// The CSV embedded in the binary.
    #[default]
    Bundled,
    /// A CSV on disk configured in settings; replaces the bundled default.
    ConfiguredFile(PathBuf),
    Placeholder(Placeholder),
    Upload { name: String, contents: Arc<str> },
}

impl DataSource {
    /// The default source for a given configured path.
    pub fn default_for(dataset_path: Option<&PathBuf>) -> Self {
        match dataset_path {
            Some(path) => DataSource::ConfiguredFile(path.clone()),
            None => DataSource::Bundled,
        }
    }

    pub fn label(&self) -> String {
        match self {
            DataSource::Bundled => "Bundled retail sample".to_string(),
            DataSource::ConfiguredFile(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DataSource::Placeholder(placeholder) => placeholder.label().to_string(),
            DataSource::Upload { name, .. } => format!("Upload: {name}"),
        }
    }

    /// Identity used for caching. Uploads are keyed by name and content digest so a
    /// re-uploaded file with new bytes never hits a stale entry.
    pub fn key(&self) -> SourceKey {
        match self {
            DataSource::Bundled => SourceKey::Bundled,
            DataSource::ConfiguredFile(path) => SourceKey::ConfiguredFile(path.clone()),
            DataSource::Placeholder(placeholder) => SourceKey::Placeholder(*placeholder),
            DataSource::Upload { name, contents } => SourceKey::Upload {
                name: name.clone(),
                digest: content_digest(contents),
                len: contents.len(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Bundled,
    ConfiguredFile(PathBuf),
    Placeholder(Placeholder),
    Upload {
        name: String,
        digest: u64,
        len: usize,
    },
}

fn content_digest(contents: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    contents.hash(&mut hasher);
    hasher.finish()
}
