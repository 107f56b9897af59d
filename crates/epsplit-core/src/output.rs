use crate::codec::encode_document;
use crate::error::SplitError;
use crate::model::OutputDocument;
use std::path::{Path, PathBuf};

/// Write documents under `out_dir`, creating directories as needed.
///
/// Without `force`, nothing is written if any target already exists.
pub fn write_documents(
    out_dir: &Path,
    documents: &[OutputDocument],
    force: bool,
) -> Result<Vec<PathBuf>, SplitError> {
    let targets: Vec<PathBuf> = documents
        .iter()
        .map(|doc| out_dir.join(&doc.relative_path))
        .collect();

    if !force {
        if let Some(existing) = targets.iter().find(|p| p.exists()) {
            return Err(SplitError::OutputExists(existing.clone()));
        }
    }

    for (doc, path) in documents.iter().zip(&targets) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, encode_document(&doc.content))?;
        tracing::debug!(path = %path.display(), bytes = doc.content.len(), "wrote document");
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn doc(path: &str, content: &str) -> OutputDocument {
        OutputDocument {
            relative_path: path.into(),
            bucket: "mouth".into(),
            shape_index: None,
            shape_count: 1,
            bbox: BoundingBox::default(),
            translated: false,
            content: content.into(),
        }
    }

    #[test]
    fn test_writes_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![doc("love_parts/mouth/love_mouth_01.eps", "%!PS\n")];
        let written = write_documents(dir.path(), &docs, false).unwrap();
        assert_eq!(written.len(), 1);
        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(content, "%!PS\n");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![doc("a.eps", "one"), doc("b.eps", "two")];
        std::fs::write(dir.path().join("b.eps"), "old").unwrap();

        let err = write_documents(dir.path(), &docs, false).unwrap_err();
        assert!(matches!(err, SplitError::OutputExists(_)));
        assert!(!dir.path().join("a.eps").exists());

        write_documents(dir.path(), &docs, true).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("b.eps")).unwrap(), "two");
    }

    #[test]
    fn test_non_ascii_written_single_byte() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![doc("c.eps", "%%Title: caf\u{e9}\n")];
        let written = write_documents(dir.path(), &docs, false).unwrap();
        let bytes = std::fs::read(&written[0]).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        assert!(bytes.contains(&0xE9));
    }
}
