//! Locations of values inside a validated instance.
use std::{fmt, sync::Arc};

/// A segment of a JSON pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSegment<'a> {
    Property(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for LocationSegment<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        LocationSegment::Property(value)
    }
}

impl<'a> From<&'a String> for LocationSegment<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        LocationSegment::Property(value.as_str())
    }
}

impl From<usize> for LocationSegment<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        LocationSegment::Index(value)
    }
}

/// A linked list of segments built on the stack while walking an instance.
///
/// It is only materialized into a [`Location`] when an error is reported.
#[derive(Debug, Clone, Copy)]
pub struct LazyLocation<'a> {
    segment: Option<LocationSegment<'a>>,
    parent: Option<&'a LazyLocation<'a>>,
}

impl Default for LazyLocation<'_> {
    fn default() -> Self {
        LazyLocation::new()
    }
}

impl<'a> LazyLocation<'a> {
    /// The instance root.
    #[must_use]
    pub const fn new() -> Self {
        LazyLocation {
            segment: None,
            parent: None,
        }
    }

    /// Extend the location with a property name or an array index.
    #[inline]
    #[must_use]
    pub fn push<'b>(&'b self, segment: impl Into<LocationSegment<'b>>) -> LazyLocation<'b>
    where
        'a: 'b,
    {
        LazyLocation {
            segment: Some(segment.into()),
            parent: Some(self),
        }
    }
}

/// An owned JSON pointer, e.g. `/vegetables/1/veggieLike`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location(Arc<String>);

impl Location {
    /// The empty pointer, referring to the whole instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn join<'a>(&self, segment: impl Into<LocationSegment<'a>>) -> Self {
        let mut buffer = String::with_capacity(self.0.len() + 8);
        buffer.push_str(&self.0);
        write_segment(&mut buffer, segment.into());
        Location(Arc::new(buffer))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn write_segment(buffer: &mut String, segment: LocationSegment<'_>) {
    buffer.push('/');
    match segment {
        LocationSegment::Property(name) => {
            for ch in name.chars() {
                match ch {
                    '~' => buffer.push_str("~0"),
                    '/' => buffer.push_str("~1"),
                    _ => buffer.push(ch),
                }
            }
        }
        LocationSegment::Index(idx) => {
            buffer.push_str(&idx.to_string());
        }
    }
}

impl From<&LazyLocation<'_>> for Location {
    fn from(value: &LazyLocation<'_>) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(value);
        while let Some(location) = current {
            if let Some(segment) = location.segment {
                segments.push(segment);
            }
            current = location.parent;
        }
        let mut buffer = String::new();
        for segment in segments.into_iter().rev() {
            write_segment(&mut buffer, segment);
        }
        Location(Arc::new(buffer))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn root_is_empty() {
        assert_eq!(Location::from(&LazyLocation::new()).as_str(), "");
    }

    #[test]
    fn lazy_location_is_materialized_in_order() {
        let root = LazyLocation::new();
        let fruits = root.push("fruits");
        let first = fruits.push(0_usize);
        let name = first.push("name");
        assert_eq!(Location::from(&name).as_str(), "/fruits/0/name");
    }

    #[test_case("a/b", "/a~1b")]
    #[test_case("m~n", "/m~0n")]
    #[test_case("", "/")]
    fn segments_are_escaped(segment: &str, expected: &str) {
        assert_eq!(Location::new().join(segment).as_str(), expected);
    }
}
