use serde::Serialize;

/// Records from one aggregation run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBatch<R> {
    records: Vec<R>,
    count: usize,
}

impl<R> Default for ReportBatch<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ReportBatch<R> {
    pub fn new() -> Self {
        ReportBatch {
            records: Vec::new(),
            count: 0,
        }
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
        self.count += 1;
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Keep only records matching `keep`; the count follows.
    pub fn retain(&mut self, keep: impl FnMut(&R) -> bool) {
        self.records.retain(keep);
        self.count = self.records.len();
    }
}

impl<R> FromIterator<R> for ReportBatch<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut batch = ReportBatch::new();
        for r in iter {
            batch.push(r);
        }
        batch
    }
}

impl<'a, R> IntoIterator for &'a ReportBatch<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_tracks_pushes() {
        let mut b = ReportBatch::new();
        assert!(b.is_empty());
        b.push("a");
        b.push("b");
        assert_eq!(b.count(), 2);
        assert_eq!(b.records(), &["a", "b"]);
    }

    #[test]
    fn collect_preserves_order() {
        let b: ReportBatch<u32> = (1..=4).collect();
        assert_eq!(b.count(), 4);
        assert_eq!(b.into_records(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn retain_updates_count() {
        let mut b: ReportBatch<u32> = (1..=6).collect();
        b.retain(|n| n % 2 == 0);
        assert_eq!(b.count(), 3);
        assert_eq!(b.records().len(), b.count());
    }

    #[test]
    fn serializes_records_and_count() {
        let b: ReportBatch<&str> = ["x"].into_iter().collect();
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"{"records":["x"],"count":1}"#);
    }
}
