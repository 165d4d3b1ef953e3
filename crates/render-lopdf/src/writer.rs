use lopdf::content::Content;
use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use productos_render_core::RenderError;
use productos_types::Size;
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes PDF objects to `W` as soon as they are produced.
///
/// Content streams and pages go straight to the output; the page tree and
/// catalog are buffered until `finish`, because they need the final page list.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    catalog_id: ObjectId,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{version}\n").as_bytes())?;
        // Binary marker so transfer tools do not treat the file as text.
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        let resources_id = (1, 0);
        let pages_id = (2, 0);
        let catalog_id = (3, 0);

        let mut buffered_objects = BTreeMap::new();
        buffered_objects.insert(resources_id, dictionary! { "Font" => font_dict }.into());

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 3,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            buffered_objects,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes `object` immediately under a fresh id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        internal_writer::write_indirect_object(&mut self.writer, id, &object, &mut self.xref)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(dictionary! {}, content.encode()?);
        Ok(self.write_object(Object::Stream(stream))?)
    }

    /// Writes one page that draws `content` and appends it to the page tree.
    pub fn write_page(
        &mut self,
        content: Content,
        page_size: Size,
    ) -> Result<ObjectId, RenderError> {
        let content_id = self.write_content_stream(content)?;
        let media_box: Vec<Object> = vec![
            0.0.into(),
            0.0.into(),
            page_size.width.into(),
            page_size.height.into(),
        ];
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.write_object(page_dict.into())?;
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    /// Writes the buffered objects, the cross-reference table and the trailer,
    /// then hands the underlying writer back.
    pub fn finish(mut self) -> io::Result<W> {
        let kids: Vec<Object> = self.page_ids.iter().copied().map(Object::Reference).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.buffered_objects.insert(self.pages_id, pages_dict.into());
        self.buffered_objects.insert(
            self.catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => self.pages_id }.into(),
        );

        for (id, object) in &self.buffered_objects {
            internal_writer::write_indirect_object(&mut self.writer, *id, object, &mut self.xref)?;
        }

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        internal_writer::write_xref(&mut self.writer, &self.xref)?;

        let trailer = dictionary! { "Size" => self.xref.size as i64, "Root" => self.catalog_id };
        writeln!(self.writer, "trailer")?;
        internal_writer::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{xref_start}")?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

mod internal_writer {
    use super::*;
    use lopdf::StringFormat;

    /// Serializes `object` as `id gen obj ... endobj` and records its offset.
    pub fn write_indirect_object<W: Write + Seek>(
        writer: &mut W,
        id: ObjectId,
        object: &Object,
        xref: &mut Xref,
    ) -> io::Result<()> {
        let offset = u32::try_from(writer.stream_position()?)
            .map_err(|_| io::Error::other("PDF exceeds the 4 GiB cross-reference limit"))?;
        xref.insert(
            id.0,
            XrefEntry::Normal {
                offset,
                generation: id.1,
            },
        );

        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        encode_object(&mut buf, object);
        buf.extend_from_slice(b"\nendobj\n");
        writer.write_all(&buf)
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        let mut buf = Vec::new();
        encode_dictionary(&mut buf, dict);
        writer.write_all(&buf)
    }

    pub(super) fn encode_object(out: &mut Vec<u8>, object: &Object) {
        match object {
            Object::Null => out.extend_from_slice(b"null"),
            Object::Boolean(value) => out.extend_from_slice(value.to_string().as_bytes()),
            Object::Integer(value) => out.extend_from_slice(value.to_string().as_bytes()),
            Object::Real(value) => out.extend_from_slice(format!("{value:.3}").as_bytes()),
            Object::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name);
            }
            Object::String(bytes, StringFormat::Literal) => {
                out.push(b'(');
                for &byte in bytes {
                    if matches!(byte, b'(' | b')' | b'\\') {
                        out.push(b'\\');
                    }
                    out.push(byte);
                }
                out.push(b')');
            }
            Object::String(bytes, StringFormat::Hexadecimal) => {
                out.push(b'<');
                for byte in bytes {
                    out.extend_from_slice(format!("{byte:02X}").as_bytes());
                }
                out.push(b'>');
            }
            Object::Array(items) => {
                out.push(b'[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(b' ');
                    }
                    encode_object(out, item);
                }
                out.push(b']');
            }
            Object::Dictionary(dict) => encode_dictionary(out, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                encode_dictionary(out, &dict);
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(&stream.content);
                out.extend_from_slice(b"\nendstream");
            }
            Object::Reference((number, generation)) => {
                out.extend_from_slice(format!("{number} {generation} R").as_bytes());
            }
        }
    }

    /// Keys are emitted in sorted order so output is reproducible.
    fn encode_dictionary(out: &mut Vec<u8>, dict: &Dictionary) {
        let mut entries: Vec<_> = dict.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        out.extend_from_slice(b"<<");
        for (key, value) in entries {
            out.push(b'/');
            out.extend_from_slice(key);
            out.push(b' ');
            encode_object(out, value);
            out.push(b' ');
        }
        out.extend_from_slice(b">>");
    }

    /// Writes the table as one subsection per run of consecutive ids, with the
    /// mandatory free entry for object 0 in front.
    pub fn write_xref<W: Write>(writer: &mut W, xref: &Xref) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 1")?;
        writeln!(writer, "0000000000 65535 f ")?;

        let mut sections: Vec<(u32, Vec<&XrefEntry>)> = Vec::new();
        for (&id, entry) in xref.entries.iter().filter(|(id, _)| **id > 0) {
            match sections.last_mut() {
                Some((start, entries)) if *start + entries.len() as u32 == id => {
                    entries.push(entry)
                }
                _ => sections.push((id, vec![entry])),
            }
        }

        for (start, entries) in sections {
            writeln!(writer, "{} {}", start, entries.len())?;
            for entry in entries {
                match entry {
                    XrefEntry::Normal { offset, generation } => {
                        writeln!(writer, "{offset:010} {generation:05} n ")?
                    }
                    _ => writeln!(writer, "0000000000 65535 f ")?,
                }
            }
        }
        Ok(())
    }
}
