use crate::mapping::Mapping;
use crate::splitter::SegmentSplitter;
use crate::vlq::{VlqDecoder, VlqEncoder};
use crate::{MappingContainer, Result};
use std::io;
use std::io::Write;

/// The textual form of a container: the VLQ `mappings` field plus the two
/// pool arrays, ready to be placed into a source map document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StringifiedMap {
    pub mappings: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
}

impl MappingContainer {
    /// Parses a VLQ `mappings` string, adding every segment at the given
    /// offsets.
    ///
    /// `line_offset` shifts the generated line of every segment.
    /// `column_offset` applies to the first segment of **every** line: the
    /// generated-column cursor restarts at the offset on each `;`, the way
    /// a fixed-width column prefix behaves. The original-position cursors
    /// persist across line breaks and start at zero; the pool cursors
    /// start at `sources_offset` / `names_offset` so foreign indices land
    /// after the entries already interned here.
    ///
    /// Raw delta semantics are preserved: deltas that push an index below
    /// zero are accepted, and the caller is responsible for offsets that
    /// make them resolve correctly.
    pub fn add_vlq_mappings(
        &mut self,
        mappings: &str,
        line_offset: i32,
        column_offset: i32,
        sources_offset: i32,
        names_offset: i32,
    ) -> Result<()> {
        if mappings.is_empty() {
            return Ok(());
        }

        let mut generated_line = line_offset;
        let mut generated_col = column_offset;
        let mut source_idx = sources_offset;
        let mut original_line = 0i32;
        let mut original_col = 0i32;
        let mut name_idx = names_offset;

        let mut decoder = VlqDecoder::new();

        for token in SegmentSplitter::new(mappings) {
            if !token.text.is_empty() {
                let fields = decoder.decode(token.text)?;

                generated_col = (i64::from(generated_col) + fields[0]) as i32;
                let mut mapping = Mapping::new(generated_line, generated_col);

                if fields.len() >= 4 {
                    source_idx = (i64::from(source_idx) + fields[1]) as i32;
                    original_line = (i64::from(original_line) + fields[2]) as i32;
                    original_col = (i64::from(original_col) + fields[3]) as i32;
                    mapping = mapping.with_source(source_idx, original_line, original_col);

                    if fields.len() == 5 {
                        name_idx = (i64::from(name_idx) + fields[4]) as i32;
                        mapping = mapping.with_name(name_idx);
                    }
                }

                self.add_mapping(mapping);
            }

            if token.ends_line {
                generated_line += 1;
                generated_col = column_offset;
            }
        }

        // trailing `;` runs still count as generated lines
        self.create_lines_if_undefined(generated_line);

        Ok(())
    }

    /// Parses a VLQ `mappings` string together with its `sources` and
    /// `names` arrays.
    ///
    /// The pool offsets are the pool sizes at call time, so the parsed
    /// segments reference the arrays appended here even when the container
    /// already holds earlier maps.
    pub fn add_raw_mappings(
        &mut self,
        mappings: &str,
        sources: Vec<String>,
        names: Vec<String>,
        line_offset: i32,
        column_offset: i32,
    ) -> Result<()> {
        let sources_offset = self.sources.count();
        let names_offset = self.names.count();
        self.add_vlq_mappings(
            mappings,
            line_offset,
            column_offset,
            sources_offset,
            names_offset,
        )?;
        self.add_names(names);
        self.add_sources(sources);
        Ok(())
    }
}

impl MappingContainer {
    /// Writes the VLQ `mappings` field for the current segment order.
    ///
    /// Call [sort](MappingContainer::sort) first when ascending output is
    /// required; emission itself never reorders. The generated-column
    /// cursor resets at every line boundary, the other four cursors
    /// persist across the whole field.
    pub fn write_vlq_mappings<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        let mut prev_generated_col = 0;
        let mut prev_source_idx = 0;
        let mut prev_original_line = 0;
        let mut prev_original_col = 0;
        let mut prev_name_idx = 0;

        for line in &self.lines {
            if line.line_number() > 0 {
                writer.write_all(b";")?;
            }
            prev_generated_col = 0;

            for (idx, mapping) in line.segments().iter().enumerate() {
                if idx > 0 {
                    writer.write_all(b",")?;
                }

                let mut encoder = VlqEncoder::new(writer);

                encoder.encode(prev_generated_col, mapping.generated.column)?;
                prev_generated_col = mapping.generated.column;

                if let Some(source_info) = mapping.source_info() {
                    encoder.encode(prev_source_idx, source_info.id)?;
                    prev_source_idx = source_info.id;

                    encoder.encode(prev_original_line, source_info.position.line)?;
                    prev_original_line = source_info.position.line;

                    encoder.encode(prev_original_col, source_info.position.column)?;
                    prev_original_col = source_info.position.column;

                    if let Some(name_idx) = mapping.name_info() {
                        encoder.encode(prev_name_idx, name_idx)?;
                        prev_name_idx = name_idx;
                    }
                }
            }
        }

        Ok(())
    }

    /// The VLQ `mappings` field as an owned string.
    pub fn to_vlq_mappings(&self) -> io::Result<String> {
        let mut buf = Vec::with_capacity(self.segment_count as usize * 6);
        self.write_vlq_mappings(&mut buf)?;
        // only base64 characters and separators are ever written
        Ok(unsafe { String::from_utf8_unchecked(buf) })
    }

    /// The container as `{ mappings, sources, names }`.
    pub fn stringify(&self) -> io::Result<StringifiedMap> {
        Ok(StringifiedMap {
            mappings: self.to_vlq_mappings()?,
            sources: self.sources.strings().to_vec(),
            names: self.names.strings().to_vec(),
        })
    }
}
