/// Append-only history of one per-segment quantity.
///
/// Algorithm steps only ever look at the most recent values and append one new
/// value. The single exception is `replace_last`, used to override the value a
/// step has just appended.
#[derive(Debug, Clone)]
pub struct Series<T> {
    values: Vec<T>,
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Series<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Replaces the most recent value, returning the old one.
    /// Returns `None` and does nothing on an empty series.
    pub fn replace_last(&mut self, value: T) -> Option<T> {
        let last = self.values.last_mut()?;
        Some(std::mem::replace(last, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.values.iter()
    }

    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.values)
    }
}

impl<T: Copy> Series<T> {
    pub fn last_copied(&self) -> Option<T> {
        self.values.last().copied()
    }
}
