use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::operations::store::{Bucket, ObjectEntry};

#[derive(Debug, Clone)]
pub struct PanelItem {
    pub name: String,
    pub kind: ItemKind,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
    pub payload: ItemPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    ParentDir,
    Folder,
    File,
}

#[derive(Debug, Clone)]
pub enum ItemPayload {
    Parent,
    Bucket(Bucket),
    Object(ObjectEntry),
    LocalEntry { path: PathBuf, is_dir: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    ModifiedAsc,
    ModifiedDesc,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            SortOrder::NameAsc => SortOrder::NameDesc,
            SortOrder::NameDesc => SortOrder::SizeDesc,
            SortOrder::SizeDesc => SortOrder::SizeAsc,
            SortOrder::SizeAsc => SortOrder::ModifiedDesc,
            SortOrder::ModifiedDesc => SortOrder::ModifiedAsc,
            SortOrder::ModifiedAsc => SortOrder::NameAsc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "Name A→Z",
            SortOrder::NameDesc => "Name Z→A",
            SortOrder::SizeAsc => "Size ↑",
            SortOrder::SizeDesc => "Size ↓",
            SortOrder::ModifiedAsc => "Date ↑",
            SortOrder::ModifiedDesc => "Date ↓",
        }
    }
}

/// Items behind a filter/sort view; panels render the view, never the raw
/// vector.
pub struct PanelList {
    items: Vec<PanelItem>,
    view: Vec<usize>,
    filter: Option<String>,
    sort: SortOrder,
}

impl PanelList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            view: Vec::new(),
            filter: None,
            sort: SortOrder::NameAsc,
        }
    }

    pub fn set_items(&mut self, items: Vec<PanelItem>) {
        self.items = items;
        self.rebuild();
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn get(&self, view_index: usize) -> Option<&PanelItem> {
        self.items.get(*self.view.get(view_index)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelItem> {
        self.view.iter().filter_map(|&i| self.items.get(i))
    }

    /// `None` or an empty pattern clears the filter.
    pub fn set_filter(&mut self, pattern: Option<String>) {
        self.filter = pattern.filter(|p| !p.is_empty());
        self.rebuild();
    }

    pub fn filter_pattern(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let mut view: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item))
            .map(|(i, _)| i)
            .collect();

        view.sort_by(|&a, &b| {
            let (a, b) = (&self.items[a], &self.items[b]);

            // ".." stays pinned to the top
            match (&a.kind, &b.kind) {
                (ItemKind::ParentDir, _) => return std::cmp::Ordering::Less,
                (_, ItemKind::ParentDir) => return std::cmp::Ordering::Greater,
                _ => {}
            }

            match self.sort {
                SortOrder::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortOrder::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
                SortOrder::SizeAsc => a.size.cmp(&b.size),
                SortOrder::SizeDesc => b.size.cmp(&a.size),
                SortOrder::ModifiedAsc => a.modified.cmp(&b.modified),
                SortOrder::ModifiedDesc => b.modified.cmp(&a.modified),
            }
        });

        self.view = view;
    }

    fn matches(&self, item: &PanelItem) -> bool {
        if item.kind == ItemKind::ParentDir {
            return true;
        }
        match &self.filter {
            Some(pattern) => wildcard_match(&item.name, pattern),
            None => true,
        }
    }
}

impl Default for PanelList {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive match with `*` wildcards; a pattern without `*` matches
/// as a substring.
pub fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();

    if !pattern.contains('*') {
        return text.contains(&pattern);
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let mut rest = text.as_str();

    if let Some(first) = parts.first() {
        if !first.is_empty() {
            match rest.strip_prefix(*first) {
                Some(stripped) => rest = stripped,
                None => return false,
            }
        }
    }

    if let Some(last) = parts.last() {
        if parts.len() > 1 && !last.is_empty() {
            match rest.strip_suffix(*last) {
                Some(stripped) => rest = stripped,
                None => return false,
            }
        }
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, kind: ItemKind, size: Option<u64>) -> PanelItem {
        PanelItem {
            name: name.to_string(),
            kind,
            size,
            modified: None,
            payload: ItemPayload::Parent,
        }
    }

    fn sample() -> Vec<PanelItem> {
        vec![
            item("..", ItemKind::ParentDir, None),
            item("zebra.png", ItemKind::File, Some(300)),
            item("apple.png", ItemKind::File, Some(100)),
            item("mango.jpg", ItemKind::File, Some(200)),
        ]
    }

    #[test]
    fn parent_entry_stays_first_regardless_of_sort() {
        let mut list = PanelList::new();
        list.set_items(sample());
        list.cycle_sort(); // NameDesc
        assert_eq!(list.get(0).unwrap().name, "..");
        assert_eq!(list.get(1).unwrap().name, "zebra.png");
    }

    #[test]
    fn sorts_by_size_descending() {
        let mut list = PanelList::new();
        list.set_items(sample());
        for _ in 0..2 {
            list.cycle_sort(); // NameDesc, SizeDesc
        }
        assert_eq!(list.sort_order(), SortOrder::SizeDesc);
        let names: Vec<_> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["..", "zebra.png", "mango.jpg", "apple.png"]);
    }

    #[test]
    fn filter_hides_non_matching_items_but_keeps_parent() {
        let mut list = PanelList::new();
        list.set_items(sample());
        list.set_filter(Some("*.png".to_string()));
        let names: Vec<_> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["..", "apple.png", "zebra.png"]);

        list.set_filter(None);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn empty_filter_pattern_clears_the_filter() {
        let mut list = PanelList::new();
        list.set_items(sample());
        list.set_filter(Some(String::new()));
        assert_eq!(list.len(), 4);
        assert!(list.filter_pattern().is_none());
    }

    #[test]
    fn wildcard_match_covers_the_common_shapes() {
        assert!(wildcard_match("spring-sale.png", "sale"));
        assert!(wildcard_match("spring-sale.png", "SPRING*"));
        assert!(wildcard_match("spring-sale.png", "*.png"));
        assert!(wildcard_match("spring-sale.png", "spring*png"));
        assert!(wildcard_match("spring-sale.png", "s*-*.png"));
        assert!(wildcard_match("anything", "*"));

        assert!(!wildcard_match("spring-sale.png", "*.jpg"));
        assert!(!wildcard_match("spring-sale.png", "winter*"));
        assert!(!wildcard_match("spring-sale.png", "sale*spring"));
    }
}
