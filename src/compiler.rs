//! External compiler API.
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::frontend::loader::strip_comments;
use crate::frontend::{SetNumber, SourceLoader};
use crate::pipeline::compile_flattened;

/// Compiles the document rooted at `path`. The set number comes from the
/// file name; inclusions resolve relative to each including file.
pub fn compile_file(path: &Path, config: &Config) -> Result<String> {
    let flattened = SourceLoader::new().load_root(path)?;
    Ok(compile_flattened(&flattened, SetNumber::from_path(path), config))
}

/// Compiles in-memory source whose inclusions resolve against `base_dir`.
pub fn compile_str(source: &str, base_dir: &Path, set: SetNumber, config: &Config) -> String {
    let flattened = SourceLoader::new().flatten(&strip_comments(source), base_dir);
    compile_flattened(&flattened, set, config)
}

/// The input path with its extension replaced by `html`.
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(default_output_path(Path::new("sets/hw2.tex")), PathBuf::from("sets/hw2.html"));
        assert_eq!(default_output_path(Path::new("set7")), PathBuf::from("set7.html"));
    }

    #[test]
    fn compiles_in_memory_source() {
        let source = "\\begin{document}\\begin{problem}One % hidden\n\\end{problem}\n\\end{document}";
        let html = compile_str(source, Path::new("."), SetNumber(2), &Config::default());
        assert!(html.contains("id=\"S02P01\""));
        assert!(!html.contains("hidden"));
    }
}
