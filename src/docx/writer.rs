//! DOCX package writer.
//!
//! Serializes a [`DocumentModel`] into WordprocessingML and packs it with the
//! minimal set of parts Word needs: content types, relationships, styles, the
//! main document, and one media part per image.

use crate::error::{Error, Result};
use crate::model::{Block, Borders, DocumentModel, Image, ImageFormat, Paragraph, Table, TextRun};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Page geometry and default run formatting, in twips and half-points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// Default font family
    pub font: String,
    /// Default font size in half-points
    pub font_size: u32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageSetup {
    /// US Letter with half-inch margins, Arial 9pt.
    pub fn letter() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin: 720,
            font: "Arial".to_string(),
            font_size: 18,
        }
    }

    /// Set the default font.
    pub fn with_font(mut self, font: impl Into<String>, size: u32) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    /// Width available between the margins.
    pub fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.margin * 2)
    }
}

/// Produces serialized document bytes from a block model.
pub trait DocumentBuilder {
    /// Serialize the model. Implementations must reject inconsistent tables.
    fn build(&self, model: &DocumentModel, page: &PageSetup) -> Result<Vec<u8>>;
}

/// Writes `.docx` packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBuilder for DocxWriter {
    fn build(&self, model: &DocumentModel, page: &PageSetup) -> Result<Vec<u8>> {
        model.validate()?;

        let media = collect_media(model);
        let document = render_document(model, page, &media)?;
        log::debug!(
            "Serialized {} blocks with {} media parts",
            model.len(),
            media.len()
        );

        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let deflated =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let stored =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", deflated)?;
        zip.write_all(content_types_xml().as_bytes())?;
        zip.start_file("_rels/.rels", deflated)?;
        zip.write_all(package_rels_xml().as_bytes())?;
        zip.start_file("word/document.xml", deflated)?;
        zip.write_all(&document)?;
        zip.start_file("word/_rels/document.xml.rels", deflated)?;
        zip.write_all(document_rels_xml(&media).as_bytes())?;
        zip.start_file("word/styles.xml", deflated)?;
        zip.write_all(styles_xml(page).as_bytes())?;
        for part in &media {
            zip.start_file(format!("word/{}", part.target), stored)?;
            zip.write_all(&part.image.data)?;
        }
        zip.finish()?;

        Ok(buffer)
    }
}

/// Write bytes to `path` through a temporary file in the same directory, so
/// that readers never observe a partially written file.
pub fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

struct MediaPart<'a> {
    rel_id: String,
    target: String,
    image: &'a Image,
}

fn collect_media(model: &DocumentModel) -> Vec<MediaPart<'_>> {
    model
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Image(image) => Some(image),
            _ => None,
        })
        .enumerate()
        .map(|(i, image)| MediaPart {
            // rId1 is the styles part
            rel_id: format!("rId{}", i + 2),
            target: format!("media/image{}.{}", i + 1, image.format.extension()),
            image,
        })
        .collect()
}

fn content_types_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="{png}" ContentType="{png_mime}"/>
  <Default Extension="{jpeg}" ContentType="{jpeg_mime}"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#,
        png = ImageFormat::Png.extension(),
        png_mime = ImageFormat::Png.mime_type(),
        jpeg = ImageFormat::Jpeg.extension(),
        jpeg_mime = ImageFormat::Jpeg.mime_type(),
    )
}

fn package_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{}" Target="word/document.xml"/>
</Relationships>"#,
        REL_OFFICE_DOCUMENT
    )
}

fn document_rels_xml(media: &[MediaPart<'_>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    xml.push_str(&format!(
        "  <Relationship Id=\"rId1\" Type=\"{}\" Target=\"styles.xml\"/>\n",
        REL_STYLES
    ));
    for part in media {
        xml.push_str(&format!(
            "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
            part.rel_id, REL_IMAGE, part.target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn styles_xml(page: &PageSetup) -> String {
    let font = escape(page.font.as_str());
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}">
  <w:docDefaults>
    <w:rPrDefault>
      <w:rPr>
        <w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>
        <w:sz w:val="{size}"/>
        <w:szCs w:val="{size}"/>
      </w:rPr>
    </w:rPrDefault>
    <w:pPrDefault>
      <w:pPr>
        <w:spacing w:after="0" w:line="240" w:lineRule="auto"/>
      </w:pPr>
    </w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#,
        ns = NS_W,
        font = font,
        size = page.font_size,
    )
}

/// Thin event helpers over the quick-xml writer.
struct XmlOut {
    writer: Writer<Vec<u8>>,
    drawing_id: u32,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            drawing_id: 0,
        }
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn render_document(
    model: &DocumentModel,
    page: &PageSetup,
    media: &[MediaPart<'_>],
) -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    out.start(
        "w:document",
        &[
            ("xmlns:w", NS_W),
            ("xmlns:r", NS_R),
            ("xmlns:wp", NS_WP),
            ("xmlns:a", NS_A),
            ("xmlns:pic", NS_PIC),
        ],
    )?;
    out.start("w:body", &[])?;

    let mut media_iter = media.iter();
    for block in &model.blocks {
        match block {
            Block::Paragraph(para) => write_paragraph(&mut out, para)?,
            Block::Table(table) => write_table(&mut out, table, page)?,
            Block::Image(_) => {
                let part = media_iter.next().ok_or_else(|| {
                    Error::Serialization("image block without media part".to_string())
                })?;
                write_image(&mut out, part)?;
            }
            Block::PageBreak => {
                out.start("w:p", &[])?;
                out.start("w:r", &[])?;
                out.empty("w:br", &[("w:type", "page")])?;
                out.end("w:r")?;
                out.end("w:p")?;
            }
        }
    }

    let (width, height, margin) = (
        page.width.to_string(),
        page.height.to_string(),
        page.margin.to_string(),
    );
    out.start("w:sectPr", &[])?;
    out.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    out.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", margin.as_str()),
            ("w:footer", margin.as_str()),
            ("w:gutter", "0"),
        ],
    )?;
    out.end("w:sectPr")?;

    out.end("w:body")?;
    out.end("w:document")?;
    Ok(out.into_inner())
}

fn write_paragraph(out: &mut XmlOut, para: &Paragraph) -> Result<()> {
    out.start("w:p", &[])?;

    let has_props = para.page_break_before
        || para.spacing_after > 0
        || para.indent.is_some()
        || para.alignment != Default::default();
    if has_props {
        out.start("w:pPr", &[])?;
        if para.page_break_before {
            out.empty("w:pageBreakBefore", &[])?;
        }
        if para.spacing_after > 0 {
            out.empty("w:spacing", &[("w:after", para.spacing_after.to_string().as_str())])?;
        }
        if let Some(indent) = para.indent {
            out.empty(
                "w:ind",
                &[
                    ("w:left", indent.left.to_string().as_str()),
                    ("w:hanging", indent.hanging.to_string().as_str()),
                ],
            )?;
        }
        if para.alignment != Default::default() {
            out.empty("w:jc", &[("w:val", para.alignment.as_ooxml())])?;
        }
        out.end("w:pPr")?;
    }

    for run in &para.runs {
        write_run(out, run)?;
    }

    out.end("w:p")
}

fn write_run(out: &mut XmlOut, run: &TextRun) -> Result<()> {
    out.start("w:r", &[])?;
    let style = &run.style;
    if style.has_formatting() {
        // Child order follows the CT_RPr sequence.
        out.start("w:rPr", &[])?;
        if style.bold {
            out.empty("w:b", &[])?;
        }
        if style.italics {
            out.empty("w:i", &[])?;
        }
        if let Some(color) = &style.color {
            out.empty("w:color", &[("w:val", color.as_str())])?;
        }
        if let Some(size) = style.size {
            let size = size.to_string();
            out.empty("w:sz", &[("w:val", size.as_str())])?;
            out.empty("w:szCs", &[("w:val", size.as_str())])?;
        }
        if style.underline {
            out.empty("w:u", &[("w:val", "single")])?;
        }
        out.end("w:rPr")?;
    }
    out.start("w:t", &[("xml:space", "preserve")])?;
    out.text(&run.text)?;
    out.end("w:t")?;
    out.end("w:r")
}

fn write_table(out: &mut XmlOut, table: &Table, page: &PageSetup) -> Result<()> {
    let columns = table.column_count();
    let widths: Vec<u32> = match table.column_widths() {
        Some(widths) => widths.into_iter().map(u32::from).collect(),
        None => vec![100 / columns as u32; columns],
    };

    out.start("w:tbl", &[])?;
    out.start("w:tblPr", &[])?;
    out.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    out.empty("w:tblLayout", &[("w:type", "fixed")])?;
    out.end("w:tblPr")?;

    out.start("w:tblGrid", &[])?;
    for pct in &widths {
        let twips = (page.content_width() * pct / 100).to_string();
        out.empty("w:gridCol", &[("w:w", twips.as_str())])?;
    }
    out.end("w:tblGrid")?;

    for row in &table.rows {
        out.start("w:tr", &[])?;
        for (cell, pct) in row.cells.iter().zip(&widths) {
            out.start("w:tc", &[])?;
            out.start("w:tcPr", &[])?;
            // Percent widths are expressed in fiftieths of a percent.
            let width = cell.width_percent.map(u32::from).unwrap_or(*pct) * 50;
            out.empty("w:tcW", &[("w:w", width.to_string().as_str()), ("w:type", "pct")])?;
            write_borders(out, &cell.borders)?;
            if let Some(fill) = &cell.background {
                out.empty(
                    "w:shd",
                    &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill.as_str())],
                )?;
            }
            out.end("w:tcPr")?;
            write_paragraph(out, &cell.content)?;
            out.end("w:tc")?;
        }
        out.end("w:tr")?;
    }

    out.end("w:tbl")
}

fn write_borders(out: &mut XmlOut, borders: &Borders) -> Result<()> {
    let size = borders.size.to_string();
    out.start("w:tcBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right"] {
        out.empty(
            side,
            &[
                ("w:val", borders.line.as_ooxml()),
                ("w:sz", size.as_str()),
                ("w:space", "0"),
                ("w:color", borders.color.as_str()),
            ],
        )?;
    }
    out.end("w:tcBorders")
}

fn write_image(out: &mut XmlOut, part: &MediaPart<'_>) -> Result<()> {
    out.drawing_id += 1;
    let id = out.drawing_id.to_string();
    let name = format!("Picture {}", id);
    let cx = part.image.width_emu().to_string();
    let cy = part.image.height_emu().to_string();
    let file_name = part.target.trim_start_matches("media/");

    out.start("w:p", &[])?;
    out.start("w:r", &[])?;
    out.start("w:drawing", &[])?;
    out.start(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;
    out.empty("wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    out.empty(
        "wp:docPr",
        &[("id", id.as_str()), ("name", name.as_str()), ("descr", part.image.alt_text.as_str())],
    )?;
    out.start("wp:cNvGraphicFramePr", &[])?;
    out.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    out.end("wp:cNvGraphicFramePr")?;
    out.start("a:graphic", &[])?;
    out.start("a:graphicData", &[("uri", NS_PIC)])?;
    out.start("pic:pic", &[])?;

    out.start("pic:nvPicPr", &[])?;
    out.empty("pic:cNvPr", &[("id", "0"), ("name", file_name)])?;
    out.empty("pic:cNvPicPr", &[])?;
    out.end("pic:nvPicPr")?;

    out.start("pic:blipFill", &[])?;
    out.empty("a:blip", &[("r:embed", part.rel_id.as_str())])?;
    out.start("a:stretch", &[])?;
    out.empty("a:fillRect", &[])?;
    out.end("a:stretch")?;
    out.end("pic:blipFill")?;

    out.start("pic:spPr", &[])?;
    out.start("a:xfrm", &[])?;
    out.empty("a:off", &[("x", "0"), ("y", "0")])?;
    out.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    out.end("a:xfrm")?;
    out.start("a:prstGeom", &[("prst", "rect")])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")?;
    out.end("pic:spPr")?;

    out.end("pic:pic")?;
    out.end("a:graphicData")?;
    out.end("a:graphic")?;
    out.end("wp:inline")?;
    out.end("w:drawing")?;
    out.end("w:r")?;
    out.end("w:p")
}
