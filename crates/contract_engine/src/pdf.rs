use async_trait::async_trait;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use sha2::{Digest, Sha256};
use studio_logging::{studio_debug, studio_info};

use crate::{
    AtomicFileWriter, Block, ContractDocument, ExportError, ExportOptions, ExportOutcome,
    ExportRequest, Exporter,
};

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.5;
const CAPTION_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
const LINE_HEIGHT_FACTOR: f32 = 1.4;
const BLOCK_SPACING: f32 = 6.0;
const HEADING_SPACING: f32 = 10.0;
const SIGNATURE_GAP: f32 = 40.0;
const SIGNATURE_WIDTH: f32 = 220.0;
const RULE_WIDTH: f32 = 0.75;
/// Share of the content width reserved for field labels.
const LABEL_COLUMN: f32 = 0.35;
/// Mean Helvetica glyph advance as a fraction of the font size. Used for
/// wrapping; the standard fonts carry no metrics we could embed here.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Mark {
    Text {
        font: Font,
        size: f32,
        x: f32,
        text: String,
    },
    Rule {
        x: f32,
        width: f32,
    },
}

/// A horizontal slice of a block. Marks sit on `baseline`, measured down from
/// the top of the line.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    marks: Vec<Mark>,
    height: f32,
    baseline: f32,
}

impl Line {
    fn text(font: Font, size: f32, x: f32, text: String) -> Self {
        Self {
            marks: vec![Mark::Text {
                font,
                size,
                x,
                text,
            }],
            height: size * LINE_HEIGHT_FACTOR,
            baseline: size,
        }
    }
}

struct LaidOutBlock {
    lines: Vec<Line>,
    space_after: f32,
}

impl LaidOutBlock {
    fn height(&self) -> f32 {
        self.lines.iter().map(|l| l.height).sum::<f32>()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Placed {
    mark: Mark,
    y: f32,
}

/// Bytes of a finished PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Renders the contract document with the built-in Helvetica fonts and writes
/// it atomically into the request's output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExporter;

#[async_trait]
impl Exporter for PdfExporter {
    async fn export(
        &self,
        document: &ContractDocument,
        request: &ExportRequest,
    ) -> Result<ExportOutcome, ExportError> {
        let document = document.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || export_blocking(&document, &request))
            .await
            .map_err(|err| ExportError::Worker(err.to_string()))?
    }
}

fn export_blocking(
    document: &ContractDocument,
    request: &ExportRequest,
) -> Result<ExportOutcome, ExportError> {
    let rendered = render_pdf(document, &request.options)?;
    let writer = AtomicFileWriter::new(request.output_dir.clone());
    let path = writer.write(&request.filename, &rendered.bytes)?;
    studio_info!(
        "Exported {:?} pages={} bytes={}",
        path,
        rendered.page_count,
        rendered.bytes.len()
    );
    Ok(ExportOutcome {
        path,
        page_count: rendered.page_count,
        bytes_written: rendered.bytes.len() as u64,
    })
}

/// Lays out and serialises `document` without touching the file system.
pub fn render_pdf(
    document: &ContractDocument,
    options: &ExportOptions,
) -> Result<RenderedPdf, ExportError> {
    options.validate()?;
    let pages = paginate(document, options);
    let page_count = pages.len();
    if options.capture.logging {
        studio_debug!(
            "Paginated '{}' blocks={} pages={}",
            document.title,
            document.blocks.len(),
            page_count
        );
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut hasher = Sha256::new();
    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for (index, placed) in pages.iter().enumerate() {
        let content = page_content(placed, index + 1, page_count, options);
        let encoded = content.encode()?;
        hasher.update(&encoded);
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let (width, height) = options.page_size();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width.into(), height.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => pdf_text(&document.title),
        "Producer" => Object::string_literal("contract_studio"),
        "CreationDate" => Object::string_literal(format!("D:{}Z", Utc::now().format("%Y%m%d%H%M%S"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    hasher.update(document.title.as_bytes());
    let digest = hasher.finalize();
    let file_id = Object::String(digest[..16].to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    if options.page.compress {
        doc.compress();
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(RenderedPdf { bytes, page_count })
}

fn paginate(document: &ContractDocument, options: &ExportOptions) -> Vec<Vec<Placed>> {
    let (content_width, content_height) = options.content_size();
    let (_, page_height) = options.page_size();
    let [top, _, _, left] = options.margin_points();
    let page_top = page_height - top;

    let mut blocks = Vec::with_capacity(document.blocks.len() + 1);
    if !document.title.is_empty() {
        blocks.push(layout_title(&document.title, content_width, left));
    }

    let mut pages: Vec<Vec<Placed>> = vec![Vec::new()];
    let mut used = 0.0_f32;
    let mut pending = blocks.into_iter().map(Some).collect::<Vec<_>>();
    pending.extend(document.blocks.iter().map(|block| match block {
        Block::PageBreak => None,
        other => Some(layout_block(other, content_width, left)),
    }));

    for laid in pending {
        let Some(laid) = laid else {
            if options.honours_explicit_breaks() && used > 0.0 {
                pages.push(Vec::new());
                used = 0.0;
            }
            continue;
        };

        let height = laid.height();
        if options.avoids_splitting_blocks()
            && used > 0.0
            && used + height > content_height
            && height <= content_height
        {
            pages.push(Vec::new());
            used = 0.0;
        }

        for line in laid.lines {
            if used > 0.0 && used + line.height > content_height {
                pages.push(Vec::new());
                used = 0.0;
            }
            let y = page_top - used - line.baseline;
            if let Some(page) = pages.last_mut() {
                page.extend(line.marks.into_iter().map(|mark| Placed { mark, y }));
            }
            used += line.height;
        }
        used += laid.space_after;
    }

    pages
}

fn layout_title(title: &str, width: f32, left: f32) -> LaidOutBlock {
    LaidOutBlock {
        lines: wrap(title, TITLE_SIZE, width)
            .into_iter()
            .map(|text| Line::text(Font::Bold, TITLE_SIZE, left, text))
            .collect(),
        space_after: HEADING_SPACING,
    }
}

fn layout_block(block: &Block, width: f32, left: f32) -> LaidOutBlock {
    match block {
        Block::Heading(text) => LaidOutBlock {
            lines: wrap(text, HEADING_SIZE, width)
                .into_iter()
                .map(|line| Line::text(Font::Bold, HEADING_SIZE, left, line))
                .collect(),
            space_after: BLOCK_SPACING,
        },
        Block::Paragraph(text) => LaidOutBlock {
            lines: wrap(text, BODY_SIZE, width)
                .into_iter()
                .map(|line| Line::text(Font::Regular, BODY_SIZE, left, line))
                .collect(),
            space_after: BLOCK_SPACING,
        },
        Block::Field { label, value } => {
            let label_width = width * LABEL_COLUMN;
            let value_x = left + label_width;
            let labels = wrap(&format!("{label}:"), BODY_SIZE, label_width);
            let values = wrap(value, BODY_SIZE, width - label_width);
            let rows = labels.len().max(values.len());
            let mut labels = labels.into_iter();
            let mut values = values.into_iter();
            let lines = (0..rows)
                .map(|_| {
                    let mut marks = Vec::with_capacity(2);
                    if let Some(text) = labels.next() {
                        marks.push(Mark::Text {
                            font: Font::Bold,
                            size: BODY_SIZE,
                            x: left,
                            text,
                        });
                    }
                    if let Some(text) = values.next() {
                        marks.push(Mark::Text {
                            font: Font::Regular,
                            size: BODY_SIZE,
                            x: value_x,
                            text,
                        });
                    }
                    Line {
                        marks,
                        height: BODY_SIZE * LINE_HEIGHT_FACTOR,
                        baseline: BODY_SIZE,
                    }
                })
                .collect();
            LaidOutBlock {
                lines,
                space_after: BLOCK_SPACING / 2.0,
            }
        }
        Block::Signature { party } => {
            let mut lines = vec![Line {
                marks: vec![Mark::Rule {
                    x: left,
                    width: SIGNATURE_WIDTH.min(width),
                }],
                height: SIGNATURE_GAP,
                baseline: SIGNATURE_GAP,
            }];
            lines.extend(
                wrap(party, CAPTION_SIZE, SIGNATURE_WIDTH.min(width))
                    .into_iter()
                    .map(|text| Line::text(Font::Regular, CAPTION_SIZE, left, text)),
            );
            LaidOutBlock {
                lines,
                space_after: BLOCK_SPACING,
            }
        }
        Block::PageBreak => LaidOutBlock {
            lines: Vec::new(),
            space_after: 0.0,
        },
    }
}

/// Greedy word wrap by estimated glyph width. Words longer than a line are
/// split; explicit newlines are kept.
fn wrap(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * AVG_CHAR_WIDTH_EM)).floor() as usize).max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }
            if chars.is_empty() {
                continue;
            }
            if current_len > 0 && current_len + 1 + chars.len() > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += chars.len();
            current.extend(chars);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn page_content(
    placed: &[Placed],
    page_number: usize,
    page_count: usize,
    options: &ExportOptions,
) -> Content {
    let mut operations = Vec::with_capacity(placed.len() * 5 + 5);
    for item in placed {
        match &item.mark {
            Mark::Text {
                font,
                size,
                x,
                text,
            } => push_text(&mut operations, *font, *size, *x, item.y, text),
            Mark::Rule { x, width } => {
                operations.push(Operation::new("w", vec![RULE_WIDTH.into()]));
                operations.push(Operation::new("m", vec![(*x).into(), item.y.into()]));
                operations.push(Operation::new("l", vec![(*x + *width).into(), item.y.into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    let footer = format!("Page {page_number} of {page_count}");
    let (content_width, _) = options.content_size();
    let [_, _, bottom, left] = options.margin_points();
    let footer_width = footer.chars().count() as f32 * FOOTER_SIZE * AVG_CHAR_WIDTH_EM;
    let footer_x = left + (content_width - footer_width) / 2.0;
    let footer_y = (bottom / 2.0).max(FOOTER_SIZE);
    push_text(
        &mut operations,
        Font::Regular,
        FOOTER_SIZE,
        footer_x,
        footer_y,
        &footer,
    );

    Content { operations }
}

fn push_text(operations: &mut Vec<Operation>, font: Font, size: f32, x: f32, y: f32, text: &str) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.resource().into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
    operations.push(Operation::new("Tj", vec![pdf_text(text)]));
    operations.push(Operation::new("ET", vec![]));
}

/// Encodes text for the WinAnsi-encoded standard fonts; anything outside that
/// code page becomes `?`.
fn pdf_text(text: &str) -> Object {
    let bytes = text
        .chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        // 10pt at 0.5em gives 10 characters per 50pt line.
        let lines = wrap("alpha beta gamma delta", 10.0, 50.0);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn wrap_splits_overlong_words_and_keeps_newlines() {
        let lines = wrap("abcdefghijklmno\nx", 10.0, 50.0);
        assert_eq!(lines, vec!["abcdefghij", "klmno", "x"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_blank_line() {
        assert_eq!(wrap("", 10.0, 50.0), vec![String::new()]);
    }

    #[test]
    fn pdf_text_maps_to_win_ansi() {
        let Object::String(bytes, _) = pdf_text("Zoë – R100 😀") else {
            panic!("expected string object");
        };
        assert_eq!(bytes, b"Zo\xEB \x96 R100 ?".to_vec());
    }

    fn page_breaks(document: &ContractDocument, options: &ExportOptions) -> usize {
        paginate(document, options).len()
    }

    #[test]
    fn explicit_breaks_depend_on_break_mode() {
        let document = ContractDocument::new("T")
            .paragraph("first")
            .page_break()
            .paragraph("second");
        let mut options = ExportOptions::default();
        assert_eq!(page_breaks(&document, &options), 2);

        options.page_break = vec![crate::PageBreakMode::AvoidAll];
        assert_eq!(page_breaks(&document, &options), 1);
    }

    #[test]
    fn avoid_all_moves_whole_block_to_next_page() {
        let options = ExportOptions::default();
        let (_, content_height) = options.content_size();
        let line_height = BODY_SIZE * LINE_HEIGHT_FACTOR;
        // Fill the first page to within two lines of the bottom.
        let filler_lines = ((content_height / line_height) as usize).saturating_sub(2);
        let filler = vec!["x"; filler_lines].join("\n");
        let document = ContractDocument {
            title: String::new(),
            blocks: vec![
                Block::Paragraph(filler),
                Block::Paragraph("a\nb\nc\nd".to_string()),
            ],
        };

        let pages = paginate(&document, &options);
        assert_eq!(pages.len(), 2);
        let second_page_text: Vec<_> = pages[1]
            .iter()
            .filter_map(|p| match &p.mark {
                Mark::Text { text, .. } => Some(text.as_str()),
                Mark::Rule { .. } => None,
            })
            .collect();
        assert_eq!(second_page_text, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn field_rows_put_value_in_second_column() {
        let laid = layout_block(
            &Block::Field {
                label: "Client Name".to_string(),
                value: "Jane Doe".to_string(),
            },
            400.0,
            20.0,
        );
        assert_eq!(laid.lines.len(), 1);
        match &laid.lines[0].marks[1] {
            Mark::Text { x, text, font, .. } => {
                assert_eq!(*font, Font::Regular);
                assert_eq!(text, "Jane Doe");
                assert!((*x - (20.0 + 400.0 * LABEL_COLUMN)).abs() < f32::EPSILON);
            }
            other => panic!("unexpected mark {other:?}"),
        }
    }
}
