//! Tag markers and line-oriented scanning
//!
//! A tag is a pair of marker lines, `//<NAME !Start!>` and `//<NAME !End!>`,
//! delimiting a region of the output file owned by one pipe. Markers are
//! matched on the trimmed line so indentation and `\r\n` endings survive a
//! round trip untouched.

use crate::error::TagError;

/// A named Start/End marker pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    start: String,
    end: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            start: format!("//<{} !Start!>", name),
            end: format!("//<{} !End!>", name),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Start marker line, without a line terminator
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The End marker line, without a line terminator
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Line indices of a Start marker and its matching End marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRegion {
    pub start: usize,
    pub end: usize,
}

/// Split text into lines, keeping each line's terminator
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Append lines verbatim
pub fn copy_lines(out: &mut String, lines: &[&str]) {
    for line in lines {
        out.push_str(line);
    }
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.trim() == marker
}

/// First line in `from..to` that is exactly `marker`
pub fn find_marker(lines: &[&str], from: usize, to: usize, marker: &str) -> Option<usize> {
    (from..to.min(lines.len())).find(|&i| is_marker(lines[i], marker))
}

/// Locate the first occurrence of `tag` in the whole file.
///
/// Returns `Ok(None)` when the tag is absent. A Start without an End, or an
/// End with no Start before it, is malformed.
pub fn locate(lines: &[&str], tag: &Tag) -> Result<Option<TagRegion>, TagError> {
    locate_between(lines, 0, lines.len(), tag)
}

/// Locate `tag` strictly inside `outer`
pub fn locate_within(
    lines: &[&str],
    outer: &TagRegion,
    tag: &Tag,
) -> Result<Option<TagRegion>, TagError> {
    locate_between(lines, outer.start + 1, outer.end, tag)
}

fn locate_between(
    lines: &[&str],
    from: usize,
    to: usize,
    tag: &Tag,
) -> Result<Option<TagRegion>, TagError> {
    let start = find_marker(lines, from, to, tag.start());
    let first_end = find_marker(lines, from, to, tag.end());

    match (start, first_end) {
        (None, None) => Ok(None),
        (None, Some(end)) => Err(TagError::malformed(
            tag.name(),
            lines,
            end,
            "End marker without a preceding Start marker",
        )),
        (Some(start), Some(end)) if end < start => Err(TagError::malformed(
            tag.name(),
            lines,
            end,
            "End marker without a preceding Start marker",
        )),
        (Some(start), _) => match find_marker(lines, start + 1, to, tag.end()) {
            Some(end) => Ok(Some(TagRegion { start, end })),
            None => Err(TagError::malformed(
                tag.name(),
                lines,
                start,
                "Start marker has no matching End marker",
            )),
        },
    }
}
