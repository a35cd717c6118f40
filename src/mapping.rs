use std::fmt::{Debug, Formatter};

/// `Position` represents a zero-based line and zero-based column in a file.
///
/// A value of `-1` in either field marks an absent position; occupied
/// positions are non-negative. The engine itself is base-agnostic, but all
/// positions it produces keep whatever base the input used.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub line: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    /// The `{-1, -1}` sentinel for "no position".
    pub const fn absent() -> Self {
        Self {
            line: -1,
            column: -1,
        }
    }

    pub const fn is_absent(&self) -> bool {
        self.line < 0
    }
}

impl From<(i32, i32)> for Position {
    fn from((line, column): (i32, i32)) -> Self {
        Self::new(line, column)
    }
}

/// A specific position in a specific source file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SourceInfo {
    pub id: i32,
    pub position: Position,
}

impl SourceInfo {
    pub const fn new(id: i32, position: Position) -> Self {
        Self { id, position }
    }
}

/// A single item of the `mappings`: a generated position, an optional
/// original position with its source index, and an optional name index.
///
/// `source == -1` marks a segment with no original source and `name == -1`
/// a segment with no symbol name; `original` is `{-1, -1}` exactly when
/// `source` is absent. The [Mapping::new] / [Mapping::with_source] /
/// [Mapping::with_name] constructors uphold this.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Mapping {
    pub generated: Position,
    pub original: Position,
    pub source: i32,
    pub name: i32,
}

impl Mapping {
    #[inline(always)]
    pub const fn new(generated_line: i32, generated_col: i32) -> Self {
        Self {
            generated: Position::new(generated_line, generated_col),
            original: Position::absent(),
            source: -1,
            name: -1,
        }
    }

    #[inline(always)]
    pub const fn with_source(self, source: i32, source_line: i32, source_col: i32) -> Self {
        Self {
            original: Position::new(source_line, source_col),
            source,
            ..self
        }
    }

    #[inline(always)]
    pub const fn with_name(self, name: i32) -> Self {
        Self { name, ..self }
    }
}

impl Mapping {
    /// Returns the source index and original position if available.
    #[inline]
    pub fn source_info(&self) -> Option<SourceInfo> {
        (self.source >= 0).then(|| SourceInfo::new(self.source, self.original))
    }

    #[inline]
    pub fn has_source(&self) -> bool {
        self.source >= 0
    }

    /// Returns the name index if available.
    #[inline]
    pub fn name_info(&self) -> Option<i32> {
        (self.name >= 0).then_some(self.name)
    }

    #[inline]
    pub fn has_name(&self) -> bool {
        self.name >= 0
    }
}

impl Debug for Mapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.generated.line, self.generated.column)?;
        if let Some(source_info) = self.source_info() {
            write!(
                f,
                " -> {}:{}:{}",
                source_info.id, source_info.position.line, source_info.position.column,
            )?;
            if let Some(name_id) = self.name_info() {
                write!(f, " ({})", name_id)?;
            }
        }
        Ok(())
    }
}
