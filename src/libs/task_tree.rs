//! Parent/child view over a flat list of tasks.
//!
//! Tasks reference their parent by id only. [`TaskTree`] keeps the records in
//! a `Vec` and the links as indices into it, so no node owns another. Tasks
//! whose parent is not part of the list are treated as roots. The store does
//! not prevent cycles; tasks caught in one are unreachable from any root and
//! are reported by [`TaskTree::detached`].

use super::task::TaskRecord;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct TaskTree {
    records: Vec<TaskRecord>,
    index: HashMap<i64, usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl TaskTree {
    /// Builds the tree. Sibling order follows the order of `records`.
    pub fn new(records: Vec<TaskRecord>) -> Self {
        let index: HashMap<i64, usize> = records.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let mut children = vec![Vec::new(); records.len()];
        let mut roots = Vec::new();

        for (i, record) in records.iter().enumerate() {
            match record.spec.parent_id.and_then(|p| index.get(&p)) {
                Some(&parent) => children[parent].push(i),
                None => roots.push(i),
            }
        }

        Self {
            records,
            index,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&TaskRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn roots(&self) -> impl Iterator<Item = &TaskRecord> {
        self.roots.iter().map(|&i| &self.records[i])
    }

    pub fn children(&self, id: i64) -> impl Iterator<Item = &TaskRecord> {
        let slots: &[usize] = match self.index.get(&id) {
            Some(&i) => &self.children[i],
            None => &[],
        };
        slots.iter().map(|&i| &self.records[i])
    }

    /// Depth-first, pre-order walk from the roots, yielding each task with its depth.
    pub fn walk(&self) -> Vec<(usize, &TaskRecord)> {
        let mut out = Vec::with_capacity(self.records.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&i| (0, i)).collect();

        while let Some((depth, i)) = stack.pop() {
            out.push((depth, &self.records[i]));
            for &child in self.children[i].iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// Tasks that no walk from a root reaches.
    pub fn detached(&self) -> Vec<&TaskRecord> {
        let reached: HashSet<i64> = self.walk().into_iter().map(|(_, r)| r.id).collect();
        self.records.iter().filter(|r| !reached.contains(&r.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskSpec;

    fn record(id: i64, name: &str, parent_id: Option<i64>) -> TaskRecord {
        let mut spec = TaskSpec::new(name, false).unwrap();
        spec.parent_id = parent_id;
        TaskRecord {
            id,
            project_id: 1,
            fulltext: name.to_lowercase(),
            spec,
        }
    }

    #[test]
    fn test_walk_is_depth_first() {
        let tree = TaskTree::new(vec![
            record(1, "Release", None),
            record(2, "Build", Some(1)),
            record(3, "Compile", Some(2)),
            record(4, "Announce", Some(1)),
            record(5, "Groceries", None),
        ]);

        let walked: Vec<(usize, i64)> = tree.walk().into_iter().map(|(d, r)| (d, r.id)).collect();
        assert_eq!(walked, vec![(0, 1), (1, 2), (2, 3), (1, 4), (0, 5)]);
        assert_eq!(tree.children(1).map(|r| r.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(tree.roots().count(), 2);
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let tree = TaskTree::new(vec![record(7, "Orphan", Some(99))]);
        assert_eq!(tree.roots().map(|r| r.id).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_cycles_are_detached() {
        let tree = TaskTree::new(vec![record(1, "A", Some(2)), record(2, "B", Some(1)), record(3, "C", None)]);
        let detached: Vec<i64> = tree.detached().iter().map(|r| r.id).collect();
        assert_eq!(detached, vec![1, 2]);
        assert_eq!(tree.walk().len(), 1);
    }
}
