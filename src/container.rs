use crate::line::MappingLine;
use crate::mapping::{Mapping, Position};
use crate::pool::StringPool;
use crate::{Error, Result};
use std::fmt::{Debug, Formatter};

/// The flattened, sorted view of a container produced by
/// [get_map](MappingContainer::get_map).
#[derive(Debug, Clone)]
pub struct MapData {
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: Vec<Mapping>,
}

/// `MappingContainer` is the aggregate of everything that makes up the
/// `mappings` side of a source map: two interned string pools, one
/// [MappingLine] per generated line, and the counters tracking its extent.
///
/// # Methods
///
/// ## Ingestion
///
/// Segments enter one at a time through
/// [add_mapping](MappingContainer::add_mapping), or in bulk through
/// [add_raw_mappings](MappingContainer::add_raw_mappings) /
/// [add_vlq_mappings](MappingContainer::add_vlq_mappings) (the textual
/// `mappings` field) and
/// [add_buffer_mappings](MappingContainer::add_buffer_mappings) (the flat
/// binary layout). The bulk paths take line/column offsets so many maps
/// can be concatenated into one container; nothing is ever removed.
///
/// ## Output
///
/// [stringify](MappingContainer::stringify) produces the VLQ `mappings`
/// string with its pool arrays, [to_buffer](MappingContainer::to_buffer)
/// the binary layout, and [get_map](MappingContainer::get_map) a
/// flattened, sorted copy of all segments.
///
/// ## Ordering
///
/// Bulk insertion preserves the input's document order within each line;
/// [sort](MappingContainer::sort) reorders every line stably by generated
/// column and is skipped per line once the line is flagged sorted.
pub struct MappingContainer {
    pub(crate) sources: StringPool,
    pub(crate) names: StringPool,
    pub(crate) lines: Vec<MappingLine>,
    pub(crate) generated_lines: i32,
    pub(crate) generated_columns: i32,
    pub(crate) segment_count: i32,
}

impl Default for MappingContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            sources: StringPool::new(),
            names: StringPool::new(),
            lines: Vec::new(),
            generated_lines: -1,
            generated_columns: 0,
            segment_count: 0,
        }
    }

    /// Creates a container from a VLQ `mappings` string plus its `sources`
    /// and `names` arrays, shifted by the given generated offsets.
    pub fn from_vlq(
        mappings: &str,
        sources: Vec<String>,
        names: Vec<String>,
        line_offset: i32,
        column_offset: i32,
    ) -> Result<Self> {
        let mut container = Self::new();
        container.add_raw_mappings(mappings, sources, names, line_offset, column_offset)?;
        Ok(container)
    }
}

impl MappingContainer {
    /// Appends one segment, growing the line table as needed and updating
    /// the container extents.
    ///
    /// The segment's generated line must be non-negative.
    pub fn add_mapping(&mut self, mapping: Mapping) {
        let line_number = mapping.generated.line;
        self.create_lines_if_undefined(line_number);
        if mapping.generated.column > self.generated_columns {
            self.generated_columns = mapping.generated.column;
        }
        self.lines[line_number as usize].append(mapping);
        self.segment_count += 1;
    }

    /// Ensures every line index up to and including `line` exists, updating
    /// `generated_lines` eagerly. Negative input is a no-op.
    pub fn create_lines_if_undefined(&mut self, line: i32) {
        if line < 0 {
            return;
        }
        while self.lines.len() <= line as usize {
            self.lines.push(MappingLine::new(self.lines.len() as i32));
        }
        if line > self.generated_lines {
            self.generated_lines = line;
        }
    }

    /// Stable-sorts every line by generated column. Lines already flagged
    /// sorted are skipped, so repeated sorts are cheap.
    pub fn sort(&mut self) {
        for line in &mut self.lines {
            line.sort();
        }
    }

    /// Sorts the container and flattens it into plain mapping data in
    /// ascending generated order.
    pub fn get_map(&mut self) -> MapData {
        self.sort();
        let mut mappings = Vec::with_capacity(self.segment_count as usize);
        for line in &self.lines {
            mappings.extend_from_slice(line.segments());
        }
        MapData {
            sources: self.sources.strings().to_vec(),
            names: self.names.strings().to_vec(),
            mappings,
        }
    }

    /// Releases every owned line and the extents derived from them; the
    /// string pools stay. Dropping the container does the same.
    pub fn finalize(&mut self) {
        self.lines = Vec::new();
        self.generated_lines = -1;
        self.generated_columns = 0;
        self.segment_count = 0;
    }
}

impl MappingContainer {
    pub fn add_source(&mut self, source: impl Into<String>) -> i32 {
        self.sources.add(source)
    }

    /// Interns each source in order, returning the index of every entry.
    pub fn add_sources(&mut self, sources: Vec<String>) -> Vec<i32> {
        sources
            .into_iter()
            .map(|source| self.sources.add(source))
            .collect()
    }

    pub fn add_name(&mut self, name: impl Into<String>) -> i32 {
        self.names.add(name)
    }

    /// Interns each name in order, returning the index of every entry.
    pub fn add_names(&mut self, names: Vec<String>) -> Vec<i32> {
        names.into_iter().map(|name| self.names.add(name)).collect()
    }

    /// Returns the pool index of `source`, or `-1` when absent.
    pub fn get_source_index(&self, source: &str) -> i32 {
        self.sources.index_of(source)
    }

    /// Returns the pool index of `name`, or `-1` when absent.
    pub fn get_name_index(&self, name: &str) -> i32 {
        self.names.index_of(name)
    }

    #[inline]
    pub fn sources(&self) -> &[String] {
        self.sources.strings()
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        self.names.strings()
    }

    #[inline]
    pub fn lines(&self) -> &[MappingLine] {
        &self.lines
    }

    /// The largest generated line index ever populated, `-1` when none.
    #[inline]
    pub fn generated_lines(&self) -> i32 {
        self.generated_lines
    }

    /// The largest generated column seen across all segments.
    #[inline]
    pub fn generated_columns(&self) -> i32 {
        self.generated_columns
    }

    #[inline]
    pub fn segment_count(&self) -> i32 {
        self.segment_count
    }
}

impl MappingContainer {
    /// Looks up the mapping covering a generated position.
    pub fn find_by_generated(&self, _position: Position) -> Result<Mapping> {
        Err(Error::Unimplemented("find_by_generated"))
    }

    /// Looks up the mapping covering an original position.
    pub fn find_by_original(&self, _position: Position) -> Result<Mapping> {
        Err(Error::Unimplemented("find_by_original"))
    }

    /// Bulk-inserts pre-decoded mappings at the given offsets.
    pub fn add_indexed_mappings(
        &mut self,
        _mappings: &[Mapping],
        _line_offset: i32,
        _column_offset: i32,
    ) -> Result<()> {
        Err(Error::Unimplemented("add_indexed_mappings"))
    }
}

impl Debug for MappingContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("MappingContainer\n")?;
        f.write_str("  sources:\n")?;
        for (idx, source) in self.sources.strings().iter().enumerate() {
            writeln!(f, "    {idx}: {source}")?;
        }
        f.write_str("  names:\n")?;
        for (idx, name) in self.names.strings().iter().enumerate() {
            writeln!(f, "    {idx}: {name}")?;
        }
        f.write_str("  mappings:")?;
        for line in &self.lines {
            if line.is_empty() {
                continue;
            }
            write!(f, "\n    ")?;
            for (idx, mapping) in line.segments().iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{mapping:?}")?;
            }
        }
        Ok(())
    }
}
