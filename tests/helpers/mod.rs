use anyhow::{Context, Result};
use notedir::domain::TreeNode;
use notedir::infrastructure::FsNoteRepository;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for working with a temporary notes root
#[allow(dead_code)]
pub struct TestNotesRoot {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestNotesRoot {
    /// Create an empty notes root
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;

        let root = temp_dir.path().join("notes");
        std::fs::create_dir(&root).context("Failed to create notes root")?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Create a notes root pre-populated with the sample notes
    pub fn with_sample_notes() -> Result<Self> {
        let fixture = Self::new()?;
        for (id, content) in sample_notes::FILES {
            fixture.add_file(id, content)?;
        }
        for dir in sample_notes::EMPTY_DIRS {
            fixture.add_dir(dir)?;
        }
        Ok(fixture)
    }

    pub fn add_file(&self, id: &str, content: &str) -> Result<()> {
        let path = self.path_of(id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))
    }

    pub fn add_dir(&self, id: &str) -> Result<()> {
        std::fs::create_dir_all(self.path_of(id)).context("Failed to create fixture folder")
    }

    pub fn path_of(&self, id: &str) -> PathBuf {
        id.split('/').fold(self.root.clone(), |p, s| p.join(s))
    }

    /// Parent of the notes root, for planting files outside of it
    pub fn outside(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Open repository for this notes root
    pub fn open_repository(&self) -> Result<FsNoteRepository> {
        FsNoteRepository::new(&self.root)
    }
}

/// Order children by id so listings compare independent of read order
#[allow(dead_code)]
pub fn sorted(mut nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.take() {
            node.children = Some(sorted(children));
        }
    }
    nodes
}

/// Ids of every node in a listing, depth first
#[allow(dead_code)]
pub fn all_ids(nodes: &[TreeNode]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|n| n.iter())
        .map(|n| n.id.clone())
        .collect()
}

/// Known sample notes
#[allow(dead_code)]
pub mod sample_notes {
    pub const FILES: &[(&str, &str)] = &[
        ("a/b.txt", "hello"),
        ("journal/2024/01-01.md", "# New year\n"),
        ("journal/2024/01-02.md", "Second day"),
        ("journal/ideas.md", "- write more tests\n"),
        ("readme.md", "Top level note"),
    ];

    pub const EMPTY_DIRS: &[&str] = &["c", "journal/drafts"];

    pub const HELLO: &str = "a/b.txt";
    pub const README: &str = "readme.md";
    pub const NONEXISTENT: &str = "does/not/exist.md";
}
