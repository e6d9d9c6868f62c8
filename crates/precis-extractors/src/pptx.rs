//! PPTX text extraction from the OOXML package.
//!
//! Slides are visited in presentation order (`p:sldIdLst` resolved through
//! the presentation relationships). For each top-level shape that carries a
//! text body, every `a:p` paragraph becomes one line of output. Group shapes
//! and graphic frames (tables, charts) are not descended into.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentKind, DocumentStructure, ExtractedContent};
use crate::Extractor;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

/// Soft line break (`a:br`) inside a paragraph, kept apart from the
/// newline that separates paragraphs.
const LINE_BREAK: char = '\u{000B}';

type Package = ZipArchive<Cursor<Vec<u8>>>;

/// PPTX extractor reading slide XML with quick-xml.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxExtractor;

impl PptxExtractor {
    /// Create new PPTX extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract per-slide paragraphs synchronously (called within spawn_blocking).
    fn extract_sync(content: Vec<u8>) -> ExtractResult<Vec<Vec<String>>> {
        let mut package = ZipArchive::new(Cursor::new(content))
            .map_err(|e| ExtractError::Pptx(format!("Failed to open PPTX package: {}", e)))?;

        let slide_parts = Self::slide_parts(&mut package)?;
        let mut slides = Vec::with_capacity(slide_parts.len());
        for part in &slide_parts {
            let xml = read_part(&mut package, part)?
                .ok_or_else(|| ExtractError::Pptx(format!("Missing slide part {}", part)))?;
            slides.push(Self::slide_paragraphs(&xml)?);
        }

        Ok(slides)
    }

    /// Slide part names in presentation order.
    fn slide_parts(package: &mut Package) -> ExtractResult<Vec<String>> {
        let presentation = read_part(package, PRESENTATION_PART)?
            .ok_or_else(|| ExtractError::Pptx(format!("Missing {}", PRESENTATION_PART)))?;
        let slide_ids = Self::slide_relationship_ids(&presentation)?;

        let Some(rels) = read_part(package, PRESENTATION_RELS_PART)? else {
            return Ok(Self::slide_parts_by_number(package));
        };
        let targets = Self::relationship_targets(&rels)?;

        slide_ids
            .iter()
            .map(|id| {
                targets
                    .get(id)
                    .map(|target| resolve_target(target))
                    .ok_or_else(|| {
                        ExtractError::Pptx(format!("Unresolved slide relationship {}", id))
                    })
            })
            .collect()
    }

    /// Fallback ordering when the presentation has no relationships part.
    fn slide_parts_by_number(package: &Package) -> Vec<String> {
        let mut numbered: Vec<(u32, String)> = package
            .file_names()
            .filter_map(|name| {
                let number = name.strip_prefix(SLIDE_PREFIX)?.strip_suffix(".xml")?;
                number.parse().ok().map(|n| (n, name.to_string()))
            })
            .collect();
        numbered.sort();
        numbered.into_iter().map(|(_, name)| name).collect()
    }

    /// `r:id` values of `p:sldId` entries, in list order.
    fn slide_relationship_ids(xml: &str) -> ExtractResult<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut ids = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.name().as_ref() == b"p:sldId" {
                        if let Some(id) = attribute(&e, b"r:id")? {
                            ids.push(id);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(PRESENTATION_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(ids)
    }

    /// Relationship id → target map.
    fn relationship_targets(xml: &str) -> ExtractResult<HashMap<String, String>> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut targets = HashMap::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.name().as_ref() == b"Relationship" {
                        if let (Some(id), Some(target)) =
                            (attribute(&e, b"Id")?, attribute(&e, b"Target")?)
                        {
                            targets.insert(id, target);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(PRESENTATION_RELS_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(targets)
    }

    /// Paragraph texts of the top-level text shapes of one slide.
    fn slide_paragraphs(xml: &str) -> ExtractResult<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.name().as_ref().to_vec();
                    match name.as_slice() {
                        b"a:p" if is_shape_text_body(&stack) => current = Some(String::new()),
                        b"a:t" => in_text = current.is_some(),
                        b"a:br" => push_break(&mut current),
                        _ => {}
                    }
                    stack.push(name);
                }
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"a:p" if is_shape_text_body(&stack) => paragraphs.push(String::new()),
                    b"a:br" => push_break(&mut current),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_text {
                        if let Some(paragraph) = current.as_mut() {
                            let value = e.unescape().map_err(|err| xml_error("slide", err))?;
                            paragraph.push_str(&value);
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    stack.pop();
                    match e.name().as_ref() {
                        b"a:t" => in_text = false,
                        b"a:p" => {
                            if let Some(paragraph) = current.take() {
                                paragraphs.push(paragraph);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error("slide", e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(paragraphs)
    }
}

/// True when the open elements end in `p:spTree / p:sp / p:txBody`.
fn is_shape_text_body(stack: &[Vec<u8>]) -> bool {
    matches!(
        stack,
        [.., tree, shape, body]
            if tree.as_slice() == b"p:spTree"
                && shape.as_slice() == b"p:sp"
                && body.as_slice() == b"p:txBody"
    )
}

fn push_break(current: &mut Option<String>) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(LINE_BREAK);
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> ExtractResult<Option<String>> {
    for attr in element.attributes().flatten() {
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error("attribute", e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve a relationship target relative to the `ppt/` directory.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

fn read_part(package: &mut Package, name: &str) -> ExtractResult<Option<String>> {
    let mut file = match package.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ExtractError::Pptx(format!("Failed to read {}: {}", name, e))),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

fn xml_error(part: &str, err: impl std::fmt::Display) -> ExtractError {
    ExtractError::Pptx(format!("Failed to parse {} XML: {}", part, err))
}

#[async_trait]
impl Extractor for PptxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let slides = tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;
        let slide_count = slides.len();
        let paragraphs: Vec<String> = slides.into_iter().flatten().collect();

        debug!(slide_count, paragraphs = paragraphs.len(), "Extracted PPTX text");

        let structure = DocumentStructure {
            slide_count: Some(slide_count),
            paragraph_count: Some(paragraphs.len()),
            ..Default::default()
        };

        Ok(
            ExtractedContent::new(paragraphs.join("\n"), DocumentKind::Pptx, content_len)
                .with_structure(structure),
        )
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pptx
    }

    fn name(&self) -> &str {
        "ooxml-pptx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId3"/>
    <p:sldId id="257" r:id="rId2"/>
  </p:sldIdLst>
</p:presentation>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
</Relationships>"#;

    const SLIDE_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree>
    <p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr>
    <p:sp>
      <p:txBody><a:bodyPr/>
        <a:p><a:r><a:t>Quarterly </a:t></a:r><a:r><a:t>results</a:t></a:r></a:p>
        <a:p/>
        <a:p><a:r><a:t>Revenue &amp; growth</a:t></a:r></a:p>
      </p:txBody>
    </p:sp>
    <p:sp><p:spPr/></p:sp>
    <p:grpSp>
      <p:sp><p:txBody><a:p><a:r><a:t>Grouped text</a:t></a:r></a:p></p:txBody></p:sp>
    </p:grpSp>
  </p:spTree></p:cSld>
</p:sld>"#;

    const SLIDE_TWO: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree>
    <p:sp><p:txBody><a:p><a:r><a:t>Agenda</a:t></a:r></a:p></p:txBody></p:sp>
  </p:spTree></p:cSld>
</p:sld>"#;

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_slides_in_presentation_order() {
        let bytes = package(&[
            (PRESENTATION_PART, PRESENTATION),
            (PRESENTATION_RELS_PART, RELS),
            ("ppt/slides/slide1.xml", SLIDE_ONE),
            ("ppt/slides/slide2.xml", SLIDE_TWO),
        ]);

        let content = PptxExtractor::new().extract(&bytes).await.unwrap();
        assert_eq!(
            content.text,
            "Agenda\nQuarterly results\n\nRevenue & growth"
        );
        assert_eq!(content.structure.slide_count, Some(2));
        assert_eq!(content.structure.paragraph_count, Some(4));
    }

    #[tokio::test]
    async fn test_missing_rels_falls_back_to_slide_numbers() {
        let bytes = package(&[
            (PRESENTATION_PART, PRESENTATION),
            ("ppt/slides/slide2.xml", SLIDE_TWO),
            ("ppt/slides/slide1.xml", SLIDE_ONE),
        ]);

        let content = PptxExtractor::new().extract(&bytes).await.unwrap();
        assert!(content.text.starts_with("Quarterly results"));
        assert!(content.text.ends_with("Agenda"));
    }

    #[tokio::test]
    async fn test_presentation_without_slides_is_empty() {
        let empty = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst/></p:presentation>"#;
        let bytes = package(&[(PRESENTATION_PART, empty), (PRESENTATION_RELS_PART, RELS)]);

        let content = PptxExtractor::new().extract(&bytes).await.unwrap();
        assert_eq!(content.text, "");
        assert_eq!(content.structure.slide_count, Some(0));
    }

    #[tokio::test]
    async fn test_not_a_package() {
        let result = PptxExtractor::new().extract(b"plain text").await;
        assert!(matches!(result, Err(ExtractError::Pptx(_))));
    }

    #[test]
    fn test_soft_line_break_stays_inside_paragraph() {
        let slide = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody>
            <a:p><a:r><a:t>First line</a:t></a:r><a:br><a:rPr/></a:br><a:r><a:t>second line</a:t></a:r></a:p>
            <a:p><a:r><a:t>Next</a:t></a:r><a:br/><a:r><a:t>point</a:t></a:r></a:p>
        </p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

        let paragraphs = PptxExtractor::slide_paragraphs(slide).unwrap();
        assert_eq!(
            paragraphs,
            vec!["First line\u{000B}second line", "Next\u{000B}point"]
        );
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide3.xml"), "ppt/slides/slide3.xml");
        assert_eq!(resolve_target("/ppt/slides/slide3.xml"), "ppt/slides/slide3.xml");
    }
}
