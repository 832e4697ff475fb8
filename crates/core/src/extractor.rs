use crate::error::IngestError;
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

pub trait PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, IngestError>;
}

/// Reads at most `max_pages` pages per document; pages past the cap are
/// silently ignored, a stated limitation of the loader rather than an error.
pub struct LopdfExtractor {
    pub max_pages: usize,
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self { max_pages: 50 }
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, IngestError> {
        let document =
            Document::load(path).map_err(|error| IngestError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages().into_iter().take(self.max_pages) {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| IngestError::PdfParse(error.to_string()))?;

            if !text.trim().is_empty() {
                pages.push(PageText {
                    number: page_no,
                    text,
                });
            }
        }

        if pages.is_empty() {
            return Err(IngestError::PdfParse(format!(
                "pdf had no readable page text: {}",
                path.display()
            )));
        }

        Ok(pages)
    }
}

pub fn join_pages(pages: &[PageText]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{join_pages, LopdfExtractor, PageText, PdfExtractor};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::path::Path;

    fn write_pdf(path: &Path, page_count: usize) {
        let mut document = lopdf::Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for number in 1..=page_count {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::string_literal(format!("pagina {number}"))],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = document.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content should encode"),
            ));
            kids.push(
                document
                    .add_object(dictionary! {
                        "Type" => "Page",
                        "Parent" => pages_id,
                        "Contents" => content_id,
                    })
                    .into(),
            );
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.save(path).expect("pdf should save");
    }

    #[test]
    fn pages_past_the_cap_are_silently_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("long.pdf");
        write_pdf(&path, 4);

        let pages = LopdfExtractor { max_pages: 2 }
            .extract_pages(&path)
            .expect("pdf should parse");

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.number <= 2));

        let all_pages = LopdfExtractor { max_pages: 50 }
            .extract_pages(&path)
            .expect("pdf should parse");
        assert_eq!(all_pages.len(), 4);
    }

    #[test]
    fn unreadable_pdf_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4\n%not really a pdf").expect("write file");

        let result = LopdfExtractor::default().extract_pages(&path);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let result = LopdfExtractor::default().extract_pages(Path::new("/nonexistent/x.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn pages_join_with_trailing_newlines() {
        let pages = vec![
            PageText {
                number: 1,
                text: "primera página".to_string(),
            },
            PageText {
                number: 2,
                text: "segunda página".to_string(),
            },
        ];
        assert_eq!(join_pages(&pages), "primera página\nsegunda página\n");
    }
}
