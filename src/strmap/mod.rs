use std::cmp::Ordering;

/// Sorted string-keyed map with binary search lookup.
///
/// Literal children per tree level are usually few, so a sorted vector beats a
/// hash map on both memory and lookup time.
#[derive(Debug, Clone)]
pub struct StrMap<T> {
    keys: Vec<Box<str>>,
    values: Vec<T>,
}

impl<T> Default for StrMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StrMap<T> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        let i = self.find_index(key).ok()?;
        self.values.get(i)
    }

    pub fn find_mut_with(&mut self, key: &str, f: impl FnOnce() -> T) -> &mut T {
        let i = match self.find_index(key) {
            Ok(i) => i,
            Err(i) => {
                self.values.insert(i, f());
                self.keys.insert(i, key.into());
                i
            }
        };
        &mut self.values[i]
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => Some(std::mem::replace(&mut self.values[i], value)),
            Err(i) => {
                self.values.insert(i, value);
                self.keys.insert(i, key.into());
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.keys.iter().map(|k| &**k).zip(self.values.iter())
    }

    fn find_index(&self, key: &str) -> Result<usize, usize> {
        self.keys
            .binary_search_by(|k| match k.len().cmp(&key.len()) {
                Ordering::Equal => (**k).cmp(key),
                ord => ord,
            })
    }
}

impl<T> IntoIterator for StrMap<T> {
    type Item = (Box<str>, T);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<Box<str>>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.values)
    }
}
