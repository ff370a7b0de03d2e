use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;

/// An ordered listing produced by one code generation pass. Emission order is
/// significant: later lines may read values defined by earlier ones.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output<O> {
    inner: Vec<O>,
}

impl<O> Default for Output<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Output<O> {
    pub const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn push(&mut self, value: impl Into<O>) {
        self.inner.push(value.into())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, O> {
        self.inner.iter()
    }

    pub fn chain_single(mut self, value: impl Into<O>) -> Self {
        self.push(value);
        self
    }
}

impl<O> IntoIterator for Output<O> {
    type IntoIter = <Vec<O> as IntoIterator>::IntoIter;
    type Item = O;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, O> IntoIterator for &'a Output<O> {
    type IntoIter = std::slice::Iter<'a, O>;
    type Item = &'a O;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<O, T> FromIterator<T> for Output<O>
where
    T: Into<O>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// one line per item, no trailing newline
impl<O: fmt::Display> fmt::Display for Output<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.inner.iter().join("\n"))
    }
}
