//! Event-driven walk over the metalink element tree.
//!
//! Elements and attributes are matched by local name, so a default
//! namespace (`xmlns="http://www.metalinker.org/"`) is accepted. Anything
//! not part of the model is skipped with its subtree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DecodeError;
use crate::model::{
    ChecksumDeclaration, Document, FileEntry, MirrorUrl, ResourceGroup, Verification,
};

pub(crate) struct Decoder<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    /// Decode the whole document. Content after the root's end tag is ignored.
    pub(crate) fn document(mut self) -> Result<Document, DecodeError> {
        loop {
            match self.next()? {
                Event::Start(e) => {
                    check_root(&e)?;
                    return self.metalink(&e);
                }
                Event::Empty(e) => {
                    check_root(&e)?;
                    return Ok(Document::default());
                }
                Event::Eof => return Err(DecodeError::MissingRoot),
                _ => {}
            }
        }
    }

    fn metalink(&mut self, root: &BytesStart<'_>) -> Result<Document, DecodeError> {
        let mut doc = Document::default();
        self.each_child(root, |d, child, empty| match child.local_name().as_ref() {
            b"files" => d.files(child, empty, &mut doc.files.entries),
            _ => d.skip(child, empty),
        })?;
        Ok(doc)
    }

    // Repeated <files> blocks append to the same set.
    fn files(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
        entries: &mut Vec<FileEntry>,
    ) -> Result<(), DecodeError> {
        if empty {
            return Ok(());
        }
        self.each_child(start, |d, child, empty| match child.local_name().as_ref() {
            b"file" => {
                entries.push(d.file(child, empty)?);
                Ok(())
            }
            _ => d.skip(child, empty),
        })
    }

    fn file(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<FileEntry, DecodeError> {
        let mut entry = FileEntry::default();
        self.attrs(start, |key, value| {
            if key == b"name" {
                entry.name = value;
            }
        })?;
        if empty {
            return Ok(entry);
        }
        self.each_child(start, |d, child, empty| {
            match child.local_name().as_ref() {
                b"size" => entry.size = d.text(child, empty)?,
                b"resources" => entry.resources.push(d.resources(child, empty)?),
                b"verification" => d.verification(child, empty, &mut entry.verification)?,
                _ => d.skip(child, empty)?,
            }
            Ok(())
        })?;
        Ok(entry)
    }

    fn resources(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<ResourceGroup, DecodeError> {
        let mut group = ResourceGroup::default();
        if empty {
            return Ok(group);
        }
        self.each_child(start, |d, child, empty| match child.local_name().as_ref() {
            b"url" => {
                group.urls.push(d.url(child, empty)?);
                Ok(())
            }
            _ => d.skip(child, empty),
        })?;
        Ok(group)
    }

    fn url(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<MirrorUrl, DecodeError> {
        let mut url = MirrorUrl::default();
        self.attrs(start, |key, value| match key {
            b"type" => url.kind = value,
            b"protocol" => url.protocol = value,
            b"location" => url.location = value,
            b"preference" => url.preference = value,
            _ => {}
        })?;
        url.link = self.text(start, empty)?;
        Ok(url)
    }

    fn verification(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
        verification: &mut Verification,
    ) -> Result<(), DecodeError> {
        if empty {
            return Ok(());
        }
        self.each_child(start, |d, child, empty| match child.local_name().as_ref() {
            b"hash" => {
                let mut hash = ChecksumDeclaration::default();
                d.attrs(child, |key, value| {
                    if key == b"type" {
                        hash.algorithm = value;
                    }
                })?;
                hash.digest = d.text(child, empty)?;
                verification.hashes.push(hash);
                Ok(())
            }
            _ => d.skip(child, empty),
        })
    }

    /// Runs `on_child` for each direct child of `parent`, up to and including
    /// the parent's end tag. `on_child` must consume a non-empty child fully.
    fn each_child<F>(&mut self, parent: &BytesStart<'_>, mut on_child: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, &BytesStart<'a>, bool) -> Result<(), DecodeError>,
    {
        loop {
            match self.next()? {
                Event::Start(e) => on_child(self, &e, false)?,
                Event::Empty(e) => on_child(self, &e, true)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(unexpected_eof(parent)),
                _ => {}
            }
        }
    }

    /// Character data directly inside `start`, verbatim. Nested elements are skipped.
    fn text(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<String, DecodeError> {
        let mut out = String::new();
        if empty {
            return Ok(out);
        }
        loop {
            match self.next()? {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| self.xml_error(e))?;
                    out.push_str(&text);
                }
                Event::CData(c) => out.push_str(std::str::from_utf8(&c)?),
                Event::Start(e) => self.skip(&e, false)?,
                Event::End(_) => return Ok(out),
                Event::Eof => return Err(unexpected_eof(start)),
                _ => {}
            }
        }
    }

    fn attrs<F>(&self, start: &BytesStart<'_>, mut on_attr: F) -> Result<(), DecodeError>
    where
        F: FnMut(&[u8], String),
    {
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.xml_error(e.into()))?;
            let value = attr.unescape_value().map_err(|e| self.xml_error(e))?;
            on_attr(attr.key.local_name().as_ref(), value.into_owned());
        }
        Ok(())
    }

    fn skip(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<(), DecodeError> {
        if empty {
            return Ok(());
        }
        self.reader
            .read_to_end(start.name())
            .map_err(|e| self.xml_error(e))?;
        Ok(())
    }

    fn next(&mut self) -> Result<Event<'a>, DecodeError> {
        self.reader.read_event().map_err(|e| self.xml_error(e))
    }

    fn xml_error(&self, source: quick_xml::Error) -> DecodeError {
        DecodeError::Xml {
            position: self.reader.error_position() as u64,
            source,
        }
    }
}

fn check_root(start: &BytesStart<'_>) -> Result<(), DecodeError> {
    if start.local_name().as_ref() == b"metalink" {
        Ok(())
    } else {
        Err(DecodeError::UnexpectedRoot {
            found: element_name(start),
        })
    }
}

fn unexpected_eof(start: &BytesStart<'_>) -> DecodeError {
    DecodeError::UnexpectedEof {
        element: element_name(start),
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}
