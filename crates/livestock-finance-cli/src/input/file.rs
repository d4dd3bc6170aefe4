use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read an input file and deserialize into a typed struct. The format
/// follows the extension: `.yaml`/`.yml` parse as YAML, anything else as
/// JSON. Decimal fields are quoted strings in both.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    parse_contents(&resolved, &contents)
}

fn parse_contents<T: DeserializeOwned>(
    path: &Path,
    contents: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed = if yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    };
    Ok(parsed)
}

/// Resolve a possibly-relative path and require a readable file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Not a readable file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
