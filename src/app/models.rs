pub const IGNORED_DIRS: &[&str] = &["node_modules", "build", "dist", ".git"];
pub const IGNORED_FILES: &[&str] = &[".DS_Store", ".gitignore", "package-lock.json", "yarn.lock"];
pub const IMPORTANT_EXTENSIONS: &[&str] =
    &["js", "jsx", "ts", "tsx", "py", "css", "html", "md", "json"];

/// Represents the final configuration after merging presets and CLI args.
///
/// The ignore lists and extensions come from the defaults above; the four
/// exclude/include lists and `minify` are supplied by the caller.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub ignored_dirs: Vec<String>,
    pub ignored_files: Vec<String>,
    pub important_extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub include_dirs: Vec<String>,
    pub include_files: Vec<String>,
    pub minify: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            ignored_dirs: owned(IGNORED_DIRS),
            ignored_files: owned(IGNORED_FILES),
            important_extensions: owned(IMPORTANT_EXTENSIONS),
            exclude_dirs: Vec::new(),
            exclude_files: Vec::new(),
            include_dirs: Vec::new(),
            include_files: Vec::new(),
            minify: false,
        }
    }
}

/// A directory or file kept in the rendered tree.
///
/// Children hold directories first, then files, each group in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryNode {
    pub name: String,
    pub is_dir: bool,
    pub children: Vec<DirEntryNode>,
}

impl DirEntryNode {
    pub fn dir(name: impl Into<String>, children: Vec<DirEntryNode>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            children,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            children: Vec::new(),
        }
    }
}

/// A file that passed every filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Root-relative path joined with `/`.
    pub relative_path: String,
    pub content: String,
    /// Line breaks + 1, so an empty file counts as one line.
    pub line_count: usize,
    /// Lines between the top of the report's content section and this
    /// file's first content line.
    pub content_offset: usize,
}

impl FileRecord {
    /// 1-based line of the first content line in a report whose preamble
    /// spans `preamble_lines` lines.
    pub fn start_line(&self, preamble_lines: usize) -> usize {
        preamble_lines + self.content_offset + 1
    }
}

#[derive(Debug, Clone)]
pub struct TraversalResult {
    pub files: Vec<FileRecord>,
    pub tree: String,
    pub file_count: usize,
    pub total_lines: usize,
}
