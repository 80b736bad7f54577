//! Identifier lists.

use std::fmt;

use super::segment::Segment;

/// An ordered sequence of segments forming a root-relative path.
///
/// The zero-length list is the distinguished "empty identifier" that denotes
/// the folder itself. A single-segment list is *simple*: it names an item
/// directly inside the folder that owns it. Longer lists are *complex* and are
/// forwarded to child providers one hop at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdList {
    segments: Vec<Segment>,
}

impl IdList {
    /// The empty identifier.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A list holding one segment.
    #[must_use]
    pub fn single(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// Build a list from segments in root-to-leaf order.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the list has exactly one segment.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// The first segment.
    #[must_use]
    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// The last segment.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Split into the first segment and the remaining list.
    #[must_use]
    pub fn split_first(&self) -> Option<(&Segment, Self)> {
        let (first, rest) = self.segments.split_first()?;
        Some((first, Self::from_segments(rest.to_vec())))
    }

    /// A new list with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// A new list with `other` appended.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// The list without its last segment; the empty list stays empty.
    #[must_use]
    pub fn parent(&self) -> Self {
        let end = self.segments.len().saturating_sub(1);
        Self::from_segments(self.segments[..end].to_vec())
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl FromIterator<Segment> for IdList {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}

impl From<Segment> for IdList {
    fn from(segment: Segment) -> Self {
        Self::single(segment)
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("\\")?;
            }
            f.write_str(segment.name())?;
        }
        Ok(())
    }
}
