use ahash::AHashMap;

/// Hit counts keyed by string, remembering the order keys were first seen.
///
/// Ranking is a stable sort by count over first-seen order, so equal counts always come
/// out in the order they first appeared.
#[derive(Debug, Clone, Default)]
pub struct HitCounter {
    entries: Vec<(String, u64)>,
    index: AHashMap<String, usize>,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Top `n` keys by count, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
