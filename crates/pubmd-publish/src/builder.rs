//! Publication builder.
//!
//! Renders the markdown source once and fans the body out to every
//! configured variant. All variants are rendered and staged in temporary
//! files inside the output directory before any of them is renamed into
//! place, so a failure never leaves a half-written output file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pubmd_renderer::{DocumentStats, render};
use tempfile::NamedTempFile;

use crate::template::{WrapOptions, wrap};

/// A single output file produced from the shared body.
#[derive(Debug, Clone)]
pub struct Variant {
    /// File name inside the output directory.
    pub file: String,
    /// Document title for this variant.
    pub title: String,
    /// Use print-oriented styling.
    pub pdf_ready: bool,
    /// Short description for build summaries.
    pub description: Option<String>,
}

/// Configuration for building a publication.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Value for the `author` meta tag.
    pub author: Option<String>,
    /// Value for the `description` meta tag.
    pub description: Option<String>,
    /// Footer lines shared by all variants.
    pub footer: Vec<String>,
    /// Output variants.
    pub variants: Vec<Variant>,
}

/// A variant rendered to a complete HTML document.
#[derive(Debug, Clone)]
pub struct RenderedVariant {
    /// The variant this document was produced for.
    pub variant: Variant,
    /// Complete HTML document.
    pub html: String,
}

/// An output file written by [`PublicationBuilder::build`].
#[derive(Debug, Clone)]
pub struct WrittenOutput {
    /// Path of the written file.
    pub path: PathBuf,
    /// The variant the file was produced for.
    pub variant: Variant,
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    /// Written files, in variant order.
    pub outputs: Vec<WrittenOutput>,
    /// Statistics of the markdown source.
    pub stats: DocumentStats,
}

/// Error returned by the publication builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{} not found", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Builds HTML publication files from a markdown source.
pub struct PublicationBuilder {
    config: BuildConfig,
}

impl PublicationBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Render every variant of `markdown` in memory.
    ///
    /// The markdown body is rendered once and wrapped once per variant.
    pub fn render(&self, markdown: &str) -> Vec<RenderedVariant> {
        let body = render(markdown);
        self.config
            .variants
            .iter()
            .map(|variant| {
                tracing::debug!(file = %variant.file, pdf_ready = variant.pdf_ready, "Wrapping variant");
                let options = WrapOptions {
                    title: variant.title.clone(),
                    author: self.config.author.clone(),
                    description: self.config.description.clone(),
                    pdf_ready: variant.pdf_ready,
                    footer: self.config.footer.clone(),
                };
                RenderedVariant {
                    variant: variant.clone(),
                    html: wrap(&body, &options),
                }
            })
            .collect()
    }

    /// Read `source`, render all variants and write them to `output_dir`.
    ///
    /// The output directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SourceNotFound`] if `source` does not exist, or a
    /// read/write error with the offending path. No output file is written
    /// when the source cannot be read.
    pub fn build(&self, source: &Path, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let markdown = fs::read_to_string(source).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BuildError::SourceNotFound(source.to_path_buf())
            } else {
                BuildError::Read {
                    path: source.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let stats = DocumentStats::collect(&markdown);
        let rendered = self.render(&markdown);

        fs::create_dir_all(output_dir).map_err(|e| BuildError::Write {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        // Stage everything first; dropped temp files are removed on error
        let staged = rendered
            .into_iter()
            .map(|doc| {
                let path = output_dir.join(&doc.variant.file);
                let tmp = stage(output_dir, &doc.html).map_err(|e| BuildError::Write {
                    path: path.clone(),
                    source: e,
                })?;
                Ok((tmp, path, doc.variant))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let mut outputs = Vec::with_capacity(staged.len());
        for (tmp, path, variant) in staged {
            tmp.persist(&path).map_err(|e| BuildError::Write {
                path: path.clone(),
                source: e.error,
            })?;
            tracing::info!(path = %path.display(), "Wrote output");
            outputs.push(WrittenOutput { path, variant });
        }

        Ok(BuildReport { outputs, stats })
    }
}

/// Write `contents` to a new temporary file in `dir`.
fn stage(dir: &Path, contents: &str) -> io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(file: &str, title: &str, pdf_ready: bool) -> Variant {
        Variant {
            file: file.to_owned(),
            title: title.to_owned(),
            pdf_ready,
            description: None,
        }
    }

    fn builder() -> PublicationBuilder {
        PublicationBuilder::new(BuildConfig {
            author: Some("A. Researcher".to_owned()),
            description: None,
            footer: vec!["Generated on 2025-06-01 12:00:00".to_owned()],
            variants: vec![
                variant("paper.html", "Paper", false),
                variant("paper_print.html", "Paper (print)", true),
            ],
        })
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_render_fans_out_variants() {
        let docs = builder().render("# Title\n\n**Bold**");
        assert_eq!(docs.len(), 2);

        for doc in &docs {
            assert!(doc.html.contains("<h1>Title</h1>"));
            assert!(doc.html.contains("<p><strong>Bold</strong></p>"));
            assert!(doc.html.contains("<meta name=\"author\" content=\"A. Researcher\">"));
            assert!(doc.html.contains("<p>Generated on 2025-06-01 12:00:00</p>"));
        }
        assert!(docs[0].html.contains("<title>Paper</title>"));
        assert!(!docs[0].html.contains("@page"));
        assert!(docs[1].html.contains("<title>Paper (print)</title>"));
        assert!(docs[1].html.contains("@page"));
    }

    #[test]
    fn test_build_writes_all_variants() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("paper.md");
        fs::write(&source, "# Title\n\n- a\n- b\n").unwrap();
        let out_dir = dir.path().join("dist");

        let report = builder().build(&source, &out_dir).unwrap();

        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.outputs[0].path, out_dir.join("paper.html"));
        assert_eq!(report.outputs[1].path, out_dir.join("paper_print.html"));
        assert_eq!(report.stats.headers, 1);
        assert_eq!(file_names(&out_dir), vec!["paper.html", "paper_print.html"]);

        let screen = fs::read_to_string(out_dir.join("paper.html")).unwrap();
        assert!(screen.contains("<ul>\n<li>a</li>\n<li>b</li>\n</ul>"));
    }

    #[test]
    fn test_build_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("paper.md");
        fs::write(&source, "new content").unwrap();
        fs::write(dir.path().join("paper.html"), "stale").unwrap();

        builder().build(&source, dir.path()).unwrap();

        let html = fs::read_to_string(dir.path().join("paper.html")).unwrap();
        assert!(html.contains("<p>new content</p>"));
    }

    #[test]
    fn test_build_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("dist");

        let err = builder()
            .build(&dir.path().join("missing.md"), &out_dir)
            .unwrap_err();

        assert!(matches!(err, BuildError::SourceNotFound(_)));
        assert!(err.to_string().ends_with("missing.md not found"));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_build_output_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("paper.md");
        fs::write(&source, "text").unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = builder().build(&source, &blocker).unwrap_err();

        assert!(matches!(err, BuildError::Write { .. }));
    }

    #[test]
    fn test_build_without_variants_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("paper.md");
        fs::write(&source, "text").unwrap();
        let out_dir = dir.path().join("dist");

        let report = PublicationBuilder::new(BuildConfig::default())
            .build(&source, &out_dir)
            .unwrap();

        assert!(report.outputs.is_empty());
        assert!(file_names(&out_dir).is_empty());
    }
}
