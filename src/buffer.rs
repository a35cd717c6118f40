use crate::line::MappingLine;
use crate::mapping::Mapping;
use crate::{Error, MappingContainer, Result};

// Flat little-endian layout, single version:
//
//   magic "KMAP", version u8,
//   names:   u32 count, then u32 byte length + utf-8 bytes per entry,
//   sources: same layout as names,
//   line_count: i32 (the largest generated line, -1 when empty),
//   lines: u32 record count (non-empty lines only), each
//          i32 line_number, u8 is_sorted, u32 segment count, and
//          6 x i32 per segment: generated line, generated column,
//          original line, original column, source, name.

const MAGIC: [u8; 4] = *b"KMAP";
const VERSION: u8 = 1;

struct BufferReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BufferReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(Error::TruncatedBuffer)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::TruncatedBuffer)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.read_bytes(4)?);
        Ok(u32::from_le_bytes(raw))
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.read_bytes(4)?);
        Ok(i32::from_le_bytes(raw))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::MalformedBuffer)
    }

    fn read_pool(&mut self) -> Result<Vec<String>> {
        let count = self.read_u32()? as usize;
        // the length prefix is untrusted, let pushes grow past this
        let mut strings = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            strings.push(self.read_string()?);
        }
        Ok(strings)
    }
}

fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_pool(buf: &mut Vec<u8>, strings: &[String]) {
    write_u32(buf, strings.len() as u32);
    for string in strings {
        write_u32(buf, string.len() as u32);
        buf.extend_from_slice(string.as_bytes());
    }
}

impl MappingContainer {
    /// Creates a container from a buffer produced by
    /// [to_buffer](MappingContainer::to_buffer), shifted by the given
    /// generated offsets.
    pub fn from_buffer(buf: &[u8], line_offset: i32, column_offset: i32) -> Result<Self> {
        let mut container = Self::new();
        container.add_buffer_mappings(buf, line_offset, column_offset)?;
        Ok(container)
    }

    /// Serializes the container to the flat binary layout, sorting first
    /// so every line is written ascending with its sorted flag set.
    pub fn to_buffer(&mut self) -> Vec<u8> {
        self.sort();

        let mut buf = Vec::with_capacity(64 + self.segment_count as usize * 24);
        buf.extend_from_slice(&MAGIC);
        buf.push(VERSION);

        write_pool(&mut buf, self.names.strings());
        write_pool(&mut buf, self.sources.strings());

        write_i32(&mut buf, self.generated_lines);

        let populated = self.lines.iter().filter(|line| !line.is_empty()).count();
        write_u32(&mut buf, populated as u32);

        for line in self.lines.iter().filter(|line| !line.is_empty()) {
            write_i32(&mut buf, line.line_number());
            buf.push(line.is_sorted() as u8);
            write_u32(&mut buf, line.segments().len() as u32);

            for mapping in line.segments() {
                write_i32(&mut buf, mapping.generated.line);
                write_i32(&mut buf, mapping.generated.column);
                write_i32(&mut buf, mapping.original.line);
                write_i32(&mut buf, mapping.original.column);
                write_i32(&mut buf, mapping.source);
                write_i32(&mut buf, mapping.name);
            }
        }

        buf
    }

    /// Merges a serialized map into this container.
    ///
    /// Incoming source and name indices are rebased onto the current pool
    /// sizes before the buffer's pools are appended; the rebase is exact
    /// when the incoming pools introduce no strings already interned here.
    /// A line's serialized sorted flag is carried over only when the
    /// target line was empty before this merge; merging into a populated
    /// line leaves ordering to the usual append tracking.
    pub fn add_buffer_mappings(
        &mut self,
        buf: &[u8],
        line_offset: i32,
        column_offset: i32,
    ) -> Result<()> {
        let mut reader = BufferReader::new(buf);

        if reader.read_bytes(MAGIC.len())? != MAGIC {
            return Err(Error::UnsupportedFormat);
        }
        if reader.read_u8()? != VERSION {
            return Err(Error::UnsupportedFormat);
        }

        let names = reader.read_pool()?;
        let sources = reader.read_pool()?;
        let line_count = reader.read_i32()?;

        let source_base = self.sources.count();
        let name_base = self.names.count();

        self.create_lines_if_undefined(line_count.saturating_add(line_offset));

        let populated = reader.read_u32()?;
        for _ in 0..populated {
            let line_number = reader.read_i32()?;
            if line_number < 0 {
                return Err(Error::MalformedBuffer);
            }
            let is_sorted = reader.read_u8()? != 0;
            let segments = reader.read_u32()?;

            let target = line_number.saturating_add(line_offset);
            let was_empty = self
                .lines
                .get(target as usize)
                .map_or(true, MappingLine::is_empty);

            for _ in 0..segments {
                let generated_line = reader.read_i32()?;
                let generated_col = reader.read_i32()?;
                let original_line = reader.read_i32()?;
                let original_col = reader.read_i32()?;
                let source = reader.read_i32()?;
                let name = reader.read_i32()?;

                let mut mapping = Mapping::new(
                    generated_line.saturating_add(line_offset),
                    generated_col.saturating_add(column_offset),
                );
                if source >= 0 {
                    mapping = mapping.with_source(
                        source.saturating_add(source_base),
                        original_line,
                        original_col,
                    );
                }
                if name >= 0 {
                    mapping = mapping.with_name(name.saturating_add(name_base));
                }
                if mapping.generated.line < 0 {
                    return Err(Error::MalformedBuffer);
                }

                self.add_mapping(mapping);
            }

            if was_empty {
                if let Some(line) = self.lines.get_mut(target as usize) {
                    line.set_is_sorted(is_sorted);
                }
            }
        }

        for source in sources {
            self.sources.add(source);
        }
        for name in names {
            self.names.add(name);
        }

        Ok(())
    }
}
