use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten a codebase into a single reviewable text file"
)]
pub struct Cli {
    /// Directory to review
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Directory names to exclude at any depth
    #[arg(long, num_args = 1..)]
    pub exclude_dirs: Option<Vec<String>>,

    /// File names to exclude
    #[arg(long, num_args = 1..)]
    pub exclude_files: Option<Vec<String>>,

    /// Only descend into directories whose path contains one of these
    #[arg(long, num_args = 1..)]
    pub include_dirs: Option<Vec<String>>,

    /// Only keep files whose path contains one of these
    #[arg(long, num_args = 1..)]
    pub include_files: Option<Vec<String>>,

    /// Strip all whitespace and drop the summary, tree and headers
    #[arg(long)]
    pub minify: bool,

    /// Where to write the result (defaults to <directory>/codebase_review.txt)
    #[arg(long, short = 'o', conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}
