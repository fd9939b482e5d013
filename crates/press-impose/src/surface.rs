//! Drawing surface abstraction.
//!
//! The engine never touches PDF library types directly; it draws through
//! [`RenderSurface`], a small capability set (pages, embedded source
//! pages, primitives, images, serialization). [`LopdfSurface`] is the
//! production adapter; its errors are mapped into the shared error enum
//! so backend types never leak out.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use press_core::{PressError, Rect, Result};

/// Opaque handle to an embedded page or image, valid within the current
/// chunk only. [`RenderSurface::finish_chunk`] invalidates all handles.
pub type SurfaceId = usize;

/// RGB color with components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Placement of an embedded page: target rectangle, uniform scale, and
/// an optional 180-degree rotation about the rectangle center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub scale: f64,
    pub rotate180: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub color: Color,
    /// Dash pattern as (on, off) lengths in points; solid when `None`.
    pub dash: Option<(f64, f64)>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 0.25,
            color: Color::BLACK,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectStyle {
    pub fill: Option<Color>,
    /// Stroke color and width.
    pub stroke: Option<(Color, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    /// Rotate the baseline 90 degrees counter-clockwise (text reads
    /// bottom to top).
    pub vertical: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 7.0,
            color: Color::BLACK,
            vertical: false,
        }
    }
}

/// The capability set the imposition engine draws through.
pub trait RenderSurface {
    /// Pages in the source document.
    fn source_page_count(&self) -> usize;

    /// (width, height) of a source page in points.
    fn source_page_size(&self, index: usize) -> Result<(f64, f64)>;

    /// Start a new output page. The previous page, if any, is completed.
    fn begin_page(&mut self, width_pt: f64, height_pt: f64) -> Result<()>;

    /// Embed a source page for reuse, optionally clipped to `clip_box`
    /// (page coordinates). Embedding the same page twice returns the
    /// same handle.
    fn embed_source_page(&mut self, index: usize, clip_box: Option<Rect>) -> Result<SurfaceId>;

    /// Draw an embedded page on the current output page.
    fn draw_embedded(&mut self, id: SurfaceId, placement: Placement) -> Result<()>;

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) -> Result<()>;

    /// Draw a single line of text with its baseline origin at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()>;

    /// Register PNG data as a drawable image.
    fn embed_png(&mut self, bytes: &[u8]) -> Result<SurfaceId>;

    fn draw_image(&mut self, id: SurfaceId, rect: Rect) -> Result<()>;

    /// Serialize everything drawn since the last call and reset for the
    /// next chunk. All handles become invalid.
    fn finish_chunk(&mut self) -> Result<Vec<u8>>;
}

// =============================================================================
// lopdf adapter
// =============================================================================

struct PageInProgress {
    width: f64,
    height: f64,
    ops: String,
    /// XObject names referenced by this page.
    xobjects: Vec<SurfaceId>,
    uses_font: bool,
}

/// Production [`RenderSurface`] backed by `lopdf`.
///
/// Source pages become Form XObjects, copied once per chunk with a deep
/// object cache; primitives are written as raw content-stream operators.
pub struct LopdfSurface {
    source: Document,
    source_pages: Vec<ObjectId>,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    copy_cache: HashMap<ObjectId, ObjectId>,
    /// handle -> XObject id in the output document.
    handles: Vec<ObjectId>,
    /// source page index -> handle, to dedupe embeds within a chunk.
    page_handles: HashMap<(usize, Option<[i64; 4]>), SurfaceId>,
    font_id: Option<ObjectId>,
    current: Option<PageInProgress>,
}

impl LopdfSurface {
    /// Load a source PDF from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let source =
            Document::load_mem(bytes).map_err(|e| PressError::PdfParse(e.to_string()))?;
        Ok(Self::new(source))
    }

    pub fn new(source: Document) -> Self {
        let source_pages: Vec<ObjectId> = source.get_pages().values().copied().collect();
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            source,
            source_pages,
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            copy_cache: HashMap::new(),
            handles: Vec::new(),
            page_handles: HashMap::new(),
            font_id: None,
            current: None,
        }
    }

    fn page_dict(&self, index: usize) -> Result<&Dictionary> {
        let id = *self
            .source_pages
            .get(index)
            .ok_or_else(|| PressError::PdfParse(format!("no page {index} in source")))?;
        self.source
            .get_dictionary(id)
            .map_err(|e| PressError::PdfParse(e.to_string()))
    }

    fn current_page(&mut self) -> Result<&mut PageInProgress> {
        self.current
            .as_mut()
            .ok_or_else(|| PressError::PdfRender("no page started".to_string()))
    }

    fn ensure_font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        let id = self.output.add_object(font);
        self.font_id = Some(id);
        id
    }

    /// Complete the in-progress page and append it to the page tree.
    fn flush_page(&mut self) -> Result<()> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };

        let mut resources = Dictionary::new();
        if !page.xobjects.is_empty() {
            let mut xobjects = Dictionary::new();
            for &handle in &page.xobjects {
                let name = format!("X{handle}");
                xobjects.set(name.as_bytes(), Object::Reference(self.handles[handle]));
            }
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        if page.uses_font {
            let font_id = self.ensure_font();
            let mut fonts = Dictionary::new();
            fonts.set("F1", Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), page.ops.into_bytes()));

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Page".to_vec()));
        dict.set("Parent", Object::Reference(self.pages_tree_id));
        dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width as f32),
                Object::Real(page.height as f32),
            ]),
        );
        dict.set("Contents", Object::Reference(content_id));
        dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    /// Create a Form XObject from a source page, copying its resources
    /// into the output document.
    fn create_page_xobject(&mut self, index: usize, clip_box: Option<Rect>) -> Result<ObjectId> {
        let page_dict = self.page_dict(index)?.clone();

        let bbox = match clip_box {
            Some(clip) => vec![
                Object::Real(clip.x as f32),
                Object::Real(clip.y as f32),
                Object::Real(clip.right() as f32),
                Object::Real(clip.top() as f32),
            ],
            None => page_dict
                .get(b"MediaBox")
                .and_then(|obj| obj.as_array())
                .ok()
                .cloned()
                .unwrap_or_else(|| {
                    vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]
                }),
        };

        let content = page_content(&self.source, &page_dict)?;

        let mut xobject_dict = Dictionary::new();
        xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
        xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
        xobject_dict.set("FormType", Object::Integer(1));
        xobject_dict.set("BBox", Object::Array(bbox));

        if let Ok(resources) = page_dict.get(b"Resources") {
            let copied = copy_object_deep(
                &mut self.output,
                &self.source,
                resources,
                &mut self.copy_cache,
            )?;
            xobject_dict.set("Resources", copied);
        }

        Ok(self.output.add_object(Stream::new(xobject_dict, content)))
    }
}

impl RenderSurface for LopdfSurface {
    fn source_page_count(&self) -> usize {
        self.source_pages.len()
    }

    fn source_page_size(&self, index: usize) -> Result<(f64, f64)> {
        let dict = self.page_dict(index)?;
        let media_box = dict
            .get(b"MediaBox")
            .and_then(|obj| obj.as_array())
            .map_err(|e| PressError::PdfParse(e.to_string()))?;
        if media_box.len() < 4 {
            return Err(PressError::PdfParse("malformed MediaBox".to_string()));
        }
        let num = |obj: &Object| -> Result<f64> {
            match obj {
                Object::Integer(i) => Ok(*i as f64),
                Object::Real(r) => Ok(*r as f64),
                _ => Err(PressError::PdfParse("non-numeric MediaBox entry".to_string())),
            }
        };
        let x0 = num(&media_box[0])?;
        let y0 = num(&media_box[1])?;
        let x1 = num(&media_box[2])?;
        let y1 = num(&media_box[3])?;
        Ok((x1 - x0, y1 - y0))
    }

    fn begin_page(&mut self, width_pt: f64, height_pt: f64) -> Result<()> {
        self.flush_page()?;
        self.current = Some(PageInProgress {
            width: width_pt,
            height: height_pt,
            ops: String::new(),
            xobjects: Vec::new(),
            uses_font: false,
        });
        Ok(())
    }

    fn embed_source_page(&mut self, index: usize, clip_box: Option<Rect>) -> Result<SurfaceId> {
        let clip_key = clip_box.map(|c| {
            [
                c.x.round() as i64,
                c.y.round() as i64,
                c.right().round() as i64,
                c.top().round() as i64,
            ]
        });
        if let Some(&handle) = self.page_handles.get(&(index, clip_key)) {
            return Ok(handle);
        }
        let xobject_id = self.create_page_xobject(index, clip_box)?;
        let handle = self.handles.len();
        self.handles.push(xobject_id);
        self.page_handles.insert((index, clip_key), handle);
        Ok(handle)
    }

    fn draw_embedded(&mut self, id: SurfaceId, placement: Placement) -> Result<()> {
        if id >= self.handles.len() {
            return Err(PressError::PdfRender(format!("stale surface handle {id}")));
        }
        let page = self.current_page()?;
        if !page.xobjects.contains(&id) {
            page.xobjects.push(id);
        }
        let rect = placement.rect;
        let s = placement.scale;
        if placement.rotate180 {
            // 180-degree rotation about the rect center: negate the scale
            // and translate to the opposite corner.
            page.ops.push_str(&format!(
                "q {} 0 0 {} {} {} cm /X{id} Do Q\n",
                -s,
                -s,
                rect.right(),
                rect.top()
            ));
        } else {
            page.ops.push_str(&format!(
                "q {s} 0 0 {s} {} {} cm /X{id} Do Q\n",
                rect.x, rect.y
            ));
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<()> {
        let fill = style.fill;
        let stroke = style.stroke;
        let page = self.current_page()?;
        page.ops.push_str("q ");
        if let Some(color) = fill {
            page.ops
                .push_str(&format!("{} {} {} rg ", color.r, color.g, color.b));
        }
        if let Some((color, width)) = stroke {
            page.ops.push_str(&format!(
                "{} {} {} RG {width} w ",
                color.r, color.g, color.b
            ));
        }
        let op = match (fill.is_some(), stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            _ => "S",
        };
        page.ops.push_str(&format!(
            "{} {} {} {} re {op} Q\n",
            rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) -> Result<()> {
        let style = *style;
        let page = self.current_page()?;
        page.ops.push_str(&format!(
            "q {} {} {} RG {} w ",
            style.color.r, style.color.g, style.color.b, style.width
        ));
        if let Some((on, off)) = style.dash {
            page.ops.push_str(&format!("[{on} {off}] 0 d "));
        }
        page.ops
            .push_str(&format!("{x1} {y1} m {x2} {y2} l S Q\n"));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        let style = *style;
        let escaped = escape_pdf_string(text);
        let page = self.current_page()?;
        page.uses_font = true;
        page.ops.push_str(&format!(
            "q BT /F1 {} Tf {} {} {} rg ",
            style.size, style.color.r, style.color.g, style.color.b
        ));
        if style.vertical {
            // Rotate the baseline 90 degrees counter-clockwise.
            page.ops.push_str(&format!("0 1 -1 0 {x} {y} Tm "));
        } else {
            page.ops.push_str(&format!("{x} {y} Td "));
        }
        page.ops.push_str(&format!("({escaped}) Tj ET Q\n"));
        Ok(())
    }

    fn embed_png(&mut self, bytes: &[u8]) -> Result<SurfaceId> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PressError::PdfRender(format!("cannot decode image: {e}")))?;
        let gray = decoded.to_luma8();
        let (width, height) = (gray.width(), gray.height());

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(width as i64));
        dict.set("Height", Object::Integer(height as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));

        let id = self.output.add_object(Stream::new(dict, gray.into_raw()));
        let handle = self.handles.len();
        self.handles.push(id);
        Ok(handle)
    }

    fn draw_image(&mut self, id: SurfaceId, rect: Rect) -> Result<()> {
        if id >= self.handles.len() {
            return Err(PressError::PdfRender(format!("stale surface handle {id}")));
        }
        let page = self.current_page()?;
        if !page.xobjects.contains(&id) {
            page.xobjects.push(id);
        }
        page.ops.push_str(&format!(
            "q {} 0 0 {} {} {} cm /X{id} Do Q\n",
            rect.width, rect.height, rect.x, rect.y
        ));
        Ok(())
    }

    fn finish_chunk(&mut self) -> Result<Vec<u8>> {
        self.flush_page()?;

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(std::mem::take(&mut self.page_refs))),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.output
            .save_to(&mut bytes)
            .map_err(|e| PressError::PdfRender(e.to_string()))?;

        // Reset for the next chunk; every handle is now stale.
        self.output = Document::with_version("1.7");
        self.pages_tree_id = self.output.new_object_id();
        self.copy_cache.clear();
        self.handles.clear();
        self.page_handles.clear();
        self.font_id = None;
        self.current = None;

        Ok(bytes)
    }
}

/// Concatenated, decompressed content streams of a page.
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        // No content stream means a blank page.
        Err(_) => return Ok(Vec::new()),
    };

    let stream_bytes = |id: ObjectId| -> Result<Vec<u8>> {
        let obj = doc
            .get_object(id)
            .map_err(|e| PressError::PdfParse(e.to_string()))?;
        match obj.as_stream() {
            Ok(stream) => Ok(stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone())),
            Err(_) => Ok(Vec::new()),
        }
    };

    match contents {
        Object::Reference(id) => stream_bytes(*id),
        Object::Array(refs) => {
            let mut result = Vec::new();
            for obj in refs {
                if let Object::Reference(id) = obj {
                    result.extend_from_slice(&stream_bytes(*id)?);
                    result.push(b'\n');
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

/// Deep copy an object from source to output, following references and
/// caching so shared resources are copied once per chunk.
fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }
            let referenced = source
                .get_object(*id)
                .map_err(|e| PressError::PdfParse(e.to_string()))?;
            // Reserve the id before recursing so reference cycles in the
            // source cannot loop forever.
            let new_id = output.add_object(Object::Null);
            cache.insert(*id, new_id);
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);
            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let copied: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(copied?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

/// Escape a string for a PDF literal string token.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping() {
        assert_eq!(escape_pdf_string("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
    }
}
