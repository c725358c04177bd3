//! Load `.tera` template files from a template directory.
//!
//! Templates are registered under their root-relative path (e.g.
//! `widgets/card.html.tera`). File bytes are decoded with the configured
//! encoding; malformed sequences are replaced and logged.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

const TEMPLATE_EXTENSION: &str = "tera";

/// Collect all `.tera` files under `template_dir`, decoded per `encoding`.
pub(crate) fn load_templates(
    template_dir: &Path,
    encoding: &'static Encoding,
) -> Result<Vec<(String, String)>, LoaderError> {
    let mut templates = Vec::new();
    collect(template_dir, template_dir, encoding, &mut templates)?;
    templates.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(templates)
}

fn collect(
    root: &Path,
    dir: &Path,
    encoding: &'static Encoding,
    out: &mut Vec<(String, String)>,
) -> Result<(), LoaderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| LoaderError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, encoding, out)?;
        } else if path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
            let bytes = std::fs::read(&path).map_err(|e| LoaderError::Io {
                path: path.clone(),
                source: e,
            })?;
            let (text, _, malformed) = encoding.decode(&bytes);
            if malformed {
                tracing::warn!(?path, encoding = encoding.name(), "Template contains malformed byte sequences, replaced");
            }
            out.push((template_name(root, &path), text.into_owned()));
        }
    }
    Ok(())
}

/// Root-relative template name with forward slashes.
fn template_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
