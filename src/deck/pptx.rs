//! Minimal Office Open XML presentation writer.
//!
//! One master, one blank layout and one theme; every slide draws its own
//! background and text boxes so the package opens without any template.

use super::structure::{Layout, Slide, SlideBody};
use super::style::TemplateStyle;
use crate::error::{DemoError, Result};
use chrono::{DateTime, Utc};
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const AUTHOR: &str = "Your Text, Your Style Generator";
pub const COMPANY: &str = "Auto-Generated";
const FALLBACK_TITLE: &str = "Generated Presentation";

const EMU_PER_INCH: f64 = 914_400.0;
/// 16:9, 10 x 5.625 in
const SLIDE_WIDTH_EMU: i64 = 9_144_000;
const SLIDE_HEIGHT_EMU: i64 = 5_143_500;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

#[derive(Debug, Clone)]
pub struct DocumentProperties {
    pub title: String,
    pub author: String,
    pub company: String,
    pub created: DateTime<Utc>,
}

impl DocumentProperties {
    /// Title from the first slide
    pub fn for_slides(slides: &[Slide]) -> Self {
        Self {
            title: slides
                .first()
                .map(|s| s.title.clone())
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            author: AUTHOR.to_string(),
            company: COMPANY.to_string(),
            created: Utc::now(),
        }
    }
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// `#1e3a8a` -> `1E3A8A`
fn hex_color(color: &str) -> String {
    color.trim_start_matches('#').to_uppercase()
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

/// Escape markup and replace characters XML 1.0 cannot carry with a space
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if !is_xml_char(c) => escaped.push(' '),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Top,
    Middle,
}

/// One text box in inches, positioned like the slide's visual layout
struct TextBox<'a> {
    name: &'a str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    paragraphs: Vec<String>,
    font_size: u32,
    color: &'a str,
    bold: bool,
    align: Align,
    anchor: Anchor,
    font: &'a str,
}

impl TextBox<'_> {
    fn to_xml(&self, shape_id: u32) -> String {
        let anchor = match self.anchor {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
        };
        let size = self.font_size * 100;
        let color = hex_color(self.color);

        let mut paragraphs = String::new();
        for text in &self.paragraphs {
            paragraphs.push_str("<a:p>");
            if self.align == Align::Center {
                paragraphs.push_str(r#"<a:pPr algn="ctr"/>"#);
            }
            if text.is_empty() {
                paragraphs.push_str(&format!(r#"<a:endParaRPr lang="en-US" sz="{}"/>"#, size));
            } else {
                paragraphs.push_str(&format!(
                    r#"<a:r><a:rPr lang="en-US" sz="{size}" b="{bold}" dirty="0"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill><a:latin typeface="{font}"/></a:rPr><a:t>{text}</a:t></a:r>"#,
                    size = size,
                    bold = if self.bold { 1 } else { 0 },
                    color = color,
                    font = escape_xml(self.font),
                    text = escape_xml(text),
                ));
            }
            paragraphs.push_str("</a:p>");
        }
        // a text body needs at least one paragraph
        if self.paragraphs.is_empty() {
            paragraphs.push_str(&format!(
                r#"<a:p><a:endParaRPr lang="en-US" sz="{}"/></a:p>"#,
                size
            ));
        }

        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name} {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="{anchor}"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
            id = shape_id,
            name = self.name,
            x = emu(self.x),
            y = emu(self.y),
            cx = emu(self.w),
            cy = emu(self.h),
            anchor = anchor,
            paragraphs = paragraphs,
        )
    }
}

fn slide_boxes<'a>(slide: &'a Slide, style: &'a TemplateStyle) -> Vec<TextBox<'a>> {
    match &slide.body {
        SlideBody::Title { subtitle } => vec![
            TextBox {
                name: "Title",
                x: 0.5,
                y: 2.0,
                w: 9.0,
                h: 2.0,
                paragraphs: vec![slide.title.clone()],
                font_size: 44,
                color: style.title_color,
                bold: true,
                align: Align::Center,
                anchor: Anchor::Middle,
                font: style.font,
            },
            TextBox {
                name: "Subtitle",
                x: 0.5,
                y: 4.5,
                w: 9.0,
                h: 1.0,
                paragraphs: vec![subtitle.clone()],
                font_size: 24,
                color: style.text_color,
                bold: false,
                align: Align::Center,
                anchor: Anchor::Middle,
                font: style.font,
            },
        ],
        SlideBody::Content { points, layout } => {
            let (paragraphs, font_size) = match layout {
                Layout::Bullet => (points.iter().map(|p| format!("• {}", p)).collect(), 20),
                _ => {
                    let mut paragraphs = Vec::with_capacity(points.len() * 2);
                    for (i, point) in points.iter().enumerate() {
                        if i > 0 {
                            paragraphs.push(String::new());
                        }
                        paragraphs.push(point.clone());
                    }
                    (paragraphs, 18)
                }
            };

            vec![
                TextBox {
                    name: "Title",
                    x: 0.5,
                    y: 0.5,
                    w: 9.0,
                    h: 1.0,
                    paragraphs: vec![slide.title.clone()],
                    font_size: 32,
                    color: style.title_color,
                    bold: true,
                    align: Align::Left,
                    anchor: Anchor::Middle,
                    font: style.font,
                },
                TextBox {
                    name: "Content",
                    x: 1.0,
                    y: 2.0,
                    w: 8.0,
                    h: 3.4,
                    paragraphs,
                    font_size,
                    color: style.text_color,
                    bold: false,
                    align: Align::Left,
                    anchor: Anchor::Top,
                    font: style.font,
                },
            ]
        }
    }
}

fn slide_xml(slide: &Slide) -> String {
    let style = slide.style_or_default();
    let shapes: String = slide_boxes(slide, &style)
        .iter()
        .enumerate()
        .map(|(i, text_box)| text_box.to_xml(i as u32 + 2))
        .collect();

    format!(
        r#"{decl}<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="{bg}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        bg = hex_color(style.background),
        shapes = shapes,
    )
}

fn content_types_xml(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                n
            )
        })
        .collect();

    format!(
        r#"{decl}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>{slides}<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#,
        decl = XML_DECL,
        slides = slides,
    )
}

fn relationships_xml(entries: &[(String, &str, String)]) -> String {
    let body: String = entries
        .iter()
        .map(|(id, kind, target)| {
            format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, kind, target
            )
        })
        .collect();
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        XML_DECL, body
    )
}

fn root_rels_xml() -> String {
    relationships_xml(&[
        (
            "rId1".to_string(),
            &format!("{}/officeDocument", REL_BASE),
            "ppt/presentation.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml".to_string(),
        ),
        (
            "rId3".to_string(),
            &format!("{}/extended-properties", REL_BASE),
            "docProps/app.xml".to_string(),
        ),
    ])
}

fn core_xml(props: &DocumentProperties) -> String {
    let stamp = props.created.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"{decl}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:creator>{author}</dc:creator><cp:lastModifiedBy>{author}</cp:lastModifiedBy><cp:revision>1</cp:revision><dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified></cp:coreProperties>"#,
        decl = XML_DECL,
        title = escape_xml(&props.title),
        author = escape_xml(&props.author),
        stamp = stamp,
    )
}

fn app_xml(props: &DocumentProperties, slide_count: usize) -> String {
    format!(
        r#"{decl}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>{app}</Application><PresentationFormat>On-screen Show (16:9)</PresentationFormat><Slides>{count}</Slides><Company>{company}</Company></Properties>"#,
        decl = XML_DECL,
        app = escape_xml(&props.author),
        count = slide_count,
        company = escape_xml(&props.company),
    )
}

fn presentation_xml(slide_count: usize) -> String {
    // rId1 is the master, rId2 the theme, slides follow
    let slide_ids: String = (0..slide_count)
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3))
        .collect();
    format!(
        r#"{decl}<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        ids = slide_ids,
        cx = SLIDE_WIDTH_EMU,
        cy = SLIDE_HEIGHT_EMU,
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut entries = vec![
        (
            "rId1".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
            "theme/theme1.xml".to_string(),
        ),
    ];
    for n in 1..=slide_count {
        entries.push((
            format!("rId{}", n + 2),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
            format!("slides/slide{}.xml", n),
        ));
    }
    relationships_xml(&entries)
}

const EMPTY_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree>"#;

fn slide_master_xml() -> String {
    format!(
        r#"{decl}<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}"><p:cSld>{tree}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE,
    )
}

fn slide_layout_xml() -> String {
    format!(
        r#"{decl}<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1"><p:cSld name="Blank">{tree}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE,
    )
}

fn theme_xml(style: &TemplateStyle) -> String {
    let srgb = |color: &str| format!(r#"<a:srgbClr val="{}"/>"#, hex_color(color));
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
            w
        )
    };
    let font = escape_xml(style.font);

    format!(
        r#"{decl}<a:theme xmlns:a="{a}" name="{name}"><a:themeElements><a:clrScheme name="Generated"><a:dk1>{dk1}</a:dk1><a:lt1>{lt1}</a:lt1><a:dk2>{dk2}</a:dk2><a:lt2>{lt2}</a:lt2><a:accent1>{acc}</a:accent1><a:accent2>{acc}</a:accent2><a:accent3>{acc}</a:accent3><a:accent4>{acc}</a:accent4><a:accent5>{acc}</a:accent5><a:accent6>{acc}</a:accent6><a:hlink>{acc}</a:hlink><a:folHlink>{acc}</a:folHlink></a:clrScheme><a:fontScheme name="Generated"><a:majorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Generated"><a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst><a:lnStyleLst>{ln1}{ln2}{ln3}</a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        decl = XML_DECL,
        a = NS_A,
        name = "Generated Theme",
        dk1 = srgb(style.title_color),
        lt1 = srgb(style.background),
        dk2 = srgb(style.text_color),
        lt2 = srgb(style.background),
        acc = srgb(style.accent_color),
        font = font,
        fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
        ln1 = line(6350),
        ln2 = line(12700),
        ln3 = line(19050),
    )
}

/// Write the full package to `writer` and hand the writer back
pub fn write_presentation<W: Write + Seek>(
    writer: W,
    slides: &[Slide],
    props: &DocumentProperties,
) -> Result<W> {
    if slides.is_empty() {
        return Err(DemoError::Generation(
            "A presentation needs at least one slide".to_string(),
        ));
    }

    let theme_style = slides[0].style_or_default();
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let slide_rels = relationships_xml(&[(
        "rId1".to_string(),
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
        "../slideLayouts/slideLayout1.xml".to_string(),
    )]);

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types_xml(slides.len())),
        ("_rels/.rels".to_string(), root_rels_xml()),
        ("docProps/core.xml".to_string(), core_xml(props)),
        ("docProps/app.xml".to_string(), app_xml(props, slides.len())),
        ("ppt/presentation.xml".to_string(), presentation_xml(slides.len())),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels_xml(slides.len()),
        ),
        (
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            slide_master_xml(),
        ),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            relationships_xml(&[
                (
                    "rId1".to_string(),
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
                    "../slideLayouts/slideLayout1.xml".to_string(),
                ),
                (
                    "rId2".to_string(),
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
                    "../theme/theme1.xml".to_string(),
                ),
            ]),
        ),
        (
            "ppt/slideLayouts/slideLayout1.xml".to_string(),
            slide_layout_xml(),
        ),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            relationships_xml(&[(
                "rId1".to_string(),
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
                "../slideMasters/slideMaster1.xml".to_string(),
            )]),
        ),
        ("ppt/theme/theme1.xml".to_string(), theme_xml(&theme_style)),
    ];

    for (i, slide) in slides.iter().enumerate() {
        parts.push((format!("ppt/slides/slide{}.xml", i + 1), slide_xml(slide)));
        parts.push((
            format!("ppt/slides/_rels/slide{}.xml.rels", i + 1),
            slide_rels.clone(),
        ));
    }

    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// The package as bytes
pub fn render_presentation(slides: &[Slide], props: &DocumentProperties) -> Result<Vec<u8>> {
    let cursor = write_presentation(Cursor::new(Vec::new()), slides, props)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::analysis::analyze_content;
    use crate::deck::structure::build_slides;
    use crate::deck::style::{apply_style, TemplateKind};
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_slides() -> Vec<Slide> {
        let analysis = analyze_content(
            "Rust & friends ship <fast> binaries. Memory safety needs no collector at all.",
            "",
        );
        let mut slides = build_slides(&analysis, "", None, true);
        apply_style(&mut slides, TemplateKind::Modern);
        slides
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_package_parts() {
        let slides = sample_slides();
        let props = DocumentProperties::for_slides(&slides);
        let bytes = render_presentation(&slides, &props).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"[Content_Types].xml"));
        assert!(names.contains(&"ppt/slides/slide3.xml"));
        assert!(!names.contains(&"ppt/slides/slide4.xml"));

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:creator>Your Text, Your Style Generator</dc:creator>"));
        assert!(core.contains("<dc:title>Rust &amp; friends ship &lt;fast&gt; binaries</dc:title>"));
        assert!(read_part(&bytes, "docProps/app.xml").contains("<Company>Auto-Generated</Company>"));
    }

    #[test]
    fn test_slide_styling() {
        let slides = sample_slides();
        let bytes = render_presentation(&slides, &DocumentProperties::for_slides(&slides)).unwrap();

        let title = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(title.contains(r#"<a:srgbClr val="0F172A"/>"#));
        assert!(title.contains(r#"sz="4400" b="1""#));
        assert!(title.contains(r#"sz="2400" b="0""#));
        assert!(title.contains(r#"typeface="Helvetica""#));
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let props = DocumentProperties::for_slides(&[]);
        assert_eq!(props.title, "Generated Presentation");
        assert!(matches!(
            render_presentation(&[], &props),
            Err(DemoError::Generation(_))
        ));
    }

    #[test]
    fn test_control_characters_are_replaced() {
        let analysis = analyze_content(
            "Quarterly revenue grew\u{0B} strongly in every region. Margins\u{0C} improved across all product lines.",
            "",
        );
        let slides = build_slides(&analysis, "", None, false);
        let bytes = render_presentation(&slides, &DocumentProperties::for_slides(&slides)).unwrap();

        for part in ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml", "docProps/core.xml"] {
            let xml = read_part(&bytes, part);
            assert!(xml.chars().all(is_xml_char), "{} carries a control character", part);
        }
        assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("Quarterly revenue grew  strongly"));

        assert_eq!(escape_xml("a\u{0}b\tc\u{FFFE}"), "a b\tc ");
    }

    #[test]
    fn test_emu_and_colors() {
        assert_eq!(emu(10.0), SLIDE_WIDTH_EMU);
        assert_eq!(emu(5.625), SLIDE_HEIGHT_EMU);
        assert_eq!(hex_color("#1e3a8a"), "1E3A8A");
    }
}
