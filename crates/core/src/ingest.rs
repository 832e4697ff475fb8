use crate::chunking::Segmenter;
use crate::error::IngestError;
use crate::extractor::{join_pages, LopdfExtractor, PdfExtractor};
use crate::models::{Chunk, DocumentFingerprint, EngineOptions, FallbackTrigger};
use crate::normalize::TextNormalizer;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort_unstable();
    files
}

pub fn digest_file(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// A PDF that failed to parse or yielded no readable text; it contributes
/// zero chunks but does not abort the load.
pub struct SkippedPdf {
    pub path: PathBuf,
    pub reason: String,
}

/// `empty_documents` lists files that parsed fine but produced no chunks by
/// either segmentation method; they are invisible to retrieval and the
/// caller should log them.
pub struct CorpusReport {
    pub chunks: Vec<Chunk>,
    pub documents: Vec<DocumentFingerprint>,
    pub skipped: Vec<SkippedPdf>,
    pub empty_documents: Vec<String>,
}

/// Extracts, normalizes and segments every PDF in the folder, in sorted
/// filename order, into one global chunk sequence. Fails fast when the
/// folder holds no PDFs at all.
pub fn load_corpus(folder: &Path, options: &EngineOptions) -> Result<CorpusReport, IngestError> {
    let files = discover_pdf_files(folder);
    if files.is_empty() {
        return Err(IngestError::EmptyFolder(folder.display().to_string()));
    }

    let normalizer = TextNormalizer::new()?;
    let segmenter = Segmenter::new(options)?;
    let extractor = LopdfExtractor {
        max_pages: options.max_pages_per_pdf,
    };

    let mut normalized_documents = Vec::new();
    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        let extracted = (|| {
            let fingerprint = fingerprint_document(&path)?;
            let pages = extractor.extract_pages(&path)?;
            Ok::<_, IngestError>((fingerprint, join_pages(&pages)))
        })();

        let (fingerprint, raw_text) = match extracted {
            Ok(parts) => parts,
            Err(error) => {
                skipped.push(SkippedPdf {
                    path,
                    reason: error.to_string(),
                });
                continue;
            }
        };

        normalized_documents.push((
            fingerprint.document_title.clone(),
            normalizer.normalize(&raw_text),
        ));
        documents.push(fingerprint);
    }

    let (chunks, empty_documents) =
        segment_corpus(&normalized_documents, &segmenter, options.fallback_trigger);

    Ok(CorpusReport {
        chunks,
        documents,
        skipped,
        empty_documents,
    })
}

/// Segments already-normalized documents, in order, into the global chunk
/// sequence, applying the paragraph fallback per the configured trigger.
pub fn segment_corpus(
    documents: &[(String, String)],
    segmenter: &Segmenter,
    trigger: FallbackTrigger,
) -> (Vec<Chunk>, Vec<String>) {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut empty_documents = Vec::new();

    for (name, normalized) in documents {
        let mut document_chunks = segmenter.segment_sections(normalized, name);

        let fallback_applies = match trigger {
            FallbackTrigger::PerDocument => document_chunks.is_empty(),
            // legacy quirk: checks the whole accumulated sequence, so only
            // the first loaded document can ever fall back to paragraphs
            FallbackTrigger::FirstDocumentOnly => {
                document_chunks.is_empty() && chunks.is_empty()
            }
        };
        if fallback_applies {
            document_chunks = segmenter.segment_paragraphs(normalized, name);
        }

        if document_chunks.is_empty() {
            empty_documents.push(name.clone());
        }

        chunks.extend(document_chunks);
    }

    (chunks, empty_documents)
}

fn fingerprint_document(path: &Path) -> Result<DocumentFingerprint, IngestError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IngestError::MissingFileName(format!("path missing filename: {}", path.display()))
        })?;

    Ok(DocumentFingerprint {
        document_title: name.to_string(),
        source_path: path.to_string_lossy().to_string(),
        checksum: digest_file(path)?,
        ingested_at: Utc::now(),
    })
}
