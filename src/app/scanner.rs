use crate::app::error::ScanError;
use crate::app::formatter::{OutputGenerator, DELIMITER_LINES, HEADER_LINES};
use crate::app::models::{DirEntryNode, FileRecord, FilterConfig, TraversalResult};
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Depth-first walker producing the accepted tree and the ordered file list
/// from a single walk.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a FilterConfig,
}

/// An open directory on the walk.
struct Frame {
    node: DirEntryNode,
    /// False below a directory the tree shows but the file selection does
    /// not descend into (include filters).
    collecting: bool,
}

/// Rebuilds the nested tree from the flat, depth-tagged walk.
struct TreeBuilder {
    root: DirEntryNode,
    open: Vec<Frame>,
}

impl TreeBuilder {
    fn new(root_name: String) -> Self {
        Self {
            root: DirEntryNode::dir(root_name, Vec::new()),
            open: Vec::new(),
        }
    }

    /// Closes directories until the parent of an entry at `depth` is on top.
    fn enter(&mut self, depth: usize) {
        while self.open.len() >= depth {
            let Some(frame) = self.open.pop() else { break };
            self.current().children.push(frame.node);
        }
    }

    fn current(&mut self) -> &mut DirEntryNode {
        match self.open.last_mut() {
            Some(frame) => &mut frame.node,
            None => &mut self.root,
        }
    }

    fn collecting(&self) -> bool {
        self.open.last().map_or(true, |frame| frame.collecting)
    }

    fn push_dir(&mut self, name: String, collecting: bool) {
        self.open.push(Frame {
            node: DirEntryNode::dir(name, Vec::new()),
            collecting,
        });
    }

    fn push_file(&mut self, name: String) {
        self.current().children.push(DirEntryNode::file(name));
    }

    fn finish(mut self) -> DirEntryNode {
        self.enter(1);
        self.root
    }
}

impl<'a> Scanner<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a FilterConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn scan(&self) -> Result<TraversalResult, ScanError> {
        // Stable sort: directories first, listing order kept within each group.
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by(|a, b| b.file_type().is_dir().cmp(&a.file_type().is_dir()))
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.skips_dir(e));

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.to_string_lossy().into_owned());
        let mut tree = TreeBuilder::new(root_name);
        let mut files = Vec::new();
        // Line offset of the next `File:` header within the content section.
        let mut cursor = 0;

        for entry in walker {
            let entry = entry.map_err(|e| self.walk_error(e))?;
            tree.enter(entry.depth());

            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();
            let collecting = tree.collecting();

            if file_type.is_dir() {
                let relative = self.relative(entry.path());
                let descend = collecting
                    && !self.is_excluded(&relative)
                    && matches_include(&relative, &self.config.include_dirs);
                tree.push_dir(name, descend);
                continue;
            }

            // Symlinks and special files are neither; they are dropped.
            if !file_type.is_file() || !self.shows_file(&name) {
                continue;
            }
            tree.push_file(name);

            if !collecting {
                continue;
            }
            let relative = self.relative(entry.path());
            if self.is_excluded(&relative)
                || !matches_include(&relative, &self.config.include_dirs)
                || !matches_include(&relative, &self.config.include_files)
            {
                continue;
            }

            let content = read_text(entry.path())?;
            let line_count = content.matches('\n').count() + 1;
            log::debug!("Accepted {} ({} lines)", relative, line_count);

            files.push(FileRecord {
                relative_path: relative,
                content,
                line_count,
                content_offset: cursor + HEADER_LINES,
            });
            cursor += HEADER_LINES + line_count + DELIMITER_LINES;
        }

        let root = tree.finish();
        let total_lines = files.iter().map(|f: &FileRecord| f.line_count).sum();

        Ok(TraversalResult {
            file_count: files.len(),
            total_lines,
            tree: OutputGenerator::generate_tree(&root),
            files,
        })
    }

    /// Ignored and excluded directories are pruned with their whole subtree.
    fn skips_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        let skip = contains(&self.config.ignored_dirs, &name) || contains(&self.config.exclude_dirs, &name);
        if skip {
            log::debug!("Skipping directory {}", entry.path().display());
        }
        skip
    }

    fn shows_file(&self, name: &str) -> bool {
        if contains(&self.config.ignored_files, name) || contains(&self.config.exclude_files, name) {
            return false;
        }
        Path::new(name)
            .extension()
            .map(|ext| contains(&self.config.important_extensions, &ext.to_string_lossy()))
            .unwrap_or(false)
    }

    /// True when any segment of the relative path is an excluded directory name.
    fn is_excluded(&self, relative: &str) -> bool {
        relative
            .split('/')
            .any(|segment| contains(&self.config.exclude_dirs, segment))
    }

    fn relative(&self, path: &Path) -> String {
        let relative = diff_paths(path, &self.root).unwrap_or_else(|| path.to_path_buf());
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn walk_error(&self, err: walkdir::Error) -> ScanError {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let message = err.to_string();
        match err.into_io_error() {
            Some(source) => ScanError::from_io(path, source),
            None => ScanError::PathUnreadable {
                path,
                source: io::Error::other(message),
            },
        }
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|item| item == name)
}

/// Substring match on the relative path. An empty list accepts everything.
fn matches_include(relative: &str, includes: &[String]) -> bool {
    includes.is_empty() || includes.iter().any(|inc| relative.contains(inc.as_str()))
}

fn read_text(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|_| ScanError::Decode {
        path: path.to_path_buf(),
    })
}
