//! Line/column source positions attached to resolved nodes.

use serde::Serialize;

/// A start/end line+column range inside a source file.
///
/// Lines and columns are 1-based, matching what editors display. The file
/// itself lives on the owning node (`TypeNode::file_path`) so that nodes in
/// the same file do not repeat the path per position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Position {
    /// Create a position spanning from start to end.
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A single-point position (start == end).
    pub const fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }
}
