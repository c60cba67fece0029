use std::collections::HashSet;

/// Deduplicated interest tags that remember first-seen order
///
/// Lookups go through the hash index; iteration follows insertion order so
/// intersections come out in a deterministic sequence.
#[derive(Debug, Clone, Default)]
pub struct InterestSet {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl InterestSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for tag in tags {
            set.insert(tag.as_ref());
        }
        set
    }

    /// Add a tag, returning false if it was already present
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.index.contains(tag) {
            return false;
        }
        self.index.insert(tag.to_string());
        self.ordered.push(tag.to_string());
        true
    }

    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains(tag)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Tags present in both sets, in this set's order
    pub fn intersection(&self, other: &InterestSet) -> Vec<String> {
        self.ordered
            .iter()
            .filter(|tag| other.contains(tag))
            .cloned()
            .collect()
    }

    /// Size of the union without materializing it
    pub fn union_len(&self, other: &InterestSet) -> usize {
        let shared = self.iter().filter(|tag| other.contains(tag)).count();
        self.len() + other.len() - shared
    }
}

impl From<&[String]> for InterestSet {
    fn from(tags: &[String]) -> Self {
        Self::new(tags)
    }
}
