use crate::app::models::{DirEntryNode, FilterConfig, TraversalResult};
use std::time::Duration;

pub const RULE_WIDTH: usize = 80;
/// `File: ...` header plus the blank line under it.
pub const HEADER_LINES: usize = 2;
/// Line steps the delimiter adds between a file's last line and the next header.
pub const DELIMITER_LINES: usize = 3;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn delimiter() -> String {
    format!("\n\n{}\n\n", rule())
}

/// Everything the summary block reports besides the traversal counts.
pub struct ReportContext<'a> {
    pub directory: &'a str,
    pub elapsed: Duration,
    pub config: &'a FilterConfig,
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// Renders the children of `root`, one line per entry, without a line for
    /// the root itself.
    pub fn generate_tree(root: &DirEntryNode) -> String {
        let mut output = String::new();
        render_children(&root.children, "", &mut output);
        output
    }

    pub fn generate_report(result: &TraversalResult, ctx: &ReportContext) -> String {
        // Start-line numbers never change the line count, so a first pass
        // with no offset measures the preamble.
        let offset = Self::preamble(result, ctx, 0).matches('\n').count();
        let mut out = Self::preamble(result, ctx, offset);

        let mut body = String::new();
        for file in &result.files {
            body.push_str(&format!(
                "File: {} (starts at line {})\n\n",
                file.relative_path,
                file.start_line(offset)
            ));
            body.push_str(&file.content);
            body.push_str(&delimiter());
        }

        out.push_str(body.trim_end());
        out
    }

    /// Concatenates every file with all whitespace removed.
    pub fn generate_minified(result: &TraversalResult) -> String {
        result
            .files
            .iter()
            .flat_map(|file| file.content.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    fn preamble(result: &TraversalResult, ctx: &ReportContext, offset: usize) -> String {
        let config = ctx.config;
        let mut out = format!(
            "Summary:\n  \
             - Directory: {}\n  \
             - Files processed: {}\n  \
             - Total lines: {}\n  \
             - Duration: {:.2} seconds\n  \
             - Excluded directories: {}\n  \
             - Excluded files: {}\n  \
             - Included directories: {}\n  \
             - Included files: {}\n\n",
            ctx.directory,
            result.file_count,
            result.total_lines,
            ctx.elapsed.as_secs_f64(),
            join_or_none(&config.exclude_dirs),
            join_or_none(&config.exclude_files),
            join_or_none(&config.include_dirs),
            join_or_none(&config.include_files),
        );

        out.push_str(&rule());
        out.push_str("\n\nDirectory Structure:\n\n");
        out.push_str(&result.tree);
        out.push_str("\nFiles extracted:\n");

        let listing: Vec<String> = result
            .files
            .iter()
            .map(|f| format!("{} (starts at line {})", f.relative_path, f.start_line(offset)))
            .collect();
        out.push_str(&listing.join("\n"));
        out.push_str("\n\n");
        out.push_str(&rule());
        out.push_str("\n\n");
        out
    }
}

fn render_children(children: &[DirEntryNode], prefix: &str, output: &mut String) {
    for (i, node) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { "└── " } else { "├── " };
        let marker = if node.is_dir { "/" } else { "" };
        output.push_str(&format!("{}{}{}{}\n", prefix, connector, node.name, marker));

        if node.is_dir {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_children(&node.children, &child_prefix, output);
        }
    }
}

pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
