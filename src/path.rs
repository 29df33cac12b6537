//! Location of the sub-value currently under inspection.
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// array element or tuple slot
    Index(usize),
    /// object member or dictionary entry
    Key(String),
    /// synthetic probe for an array's length
    Length,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{i}"),
            Segment::Key(k) => f.write_str(k),
            Segment::Length => f.write_str(".length"),
        }
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self { Segment::Index(i) }
}

impl From<&str> for Segment {
    fn from(k: &str) -> Self { Segment::Key(k.to_string()) }
}

/// Append-only sequence of segments from the checked root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn segments(&self) -> &[Segment] { &self.0 }

    /// A new path one segment deeper. `self` is left untouched.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 { f.write_str("/")?; }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_appends_without_touching_parent() {
        let root = Path::root();
        let a = root.child("items");
        let b = a.child(3usize).child(Segment::Length);
        assert!(root.is_empty());
        assert_eq!(a.segments().len(), 1);
        assert_eq!(b.to_string(), "items/3/.length");
    }
}
