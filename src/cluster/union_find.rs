//! Array-backed disjoint-set (union-find) over event indices
//!
//! Indexed by position rather than identifier for cache locality. Uses path
//! compression and union by size, giving near-constant amortized find/union
//! once edges are known.

/// Disjoint-set forest over `0..n`
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the structure is empty
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the set representative of `x`, compressing the path
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass: point every node on the path at the root
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`; returns false if already merged
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        // Attach the smaller tree under the larger
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    /// Whether `a` and `b` are in the same set
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Extract all sets as index groups
    ///
    /// Groups appear in discovery order: a group is created the first time
    /// any of its members is visited in index order, and members are listed
    /// in index order. This keeps the output deterministic regardless of the
    /// order edges were discovered in.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut group_of_root = vec![usize::MAX; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            if group_of_root[root] == usize::MAX {
                group_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[group_of_root[root]].push(i);
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_are_disjoint() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.len(), 4);
        assert!(!uf.connected(0, 1));
        assert!(!uf.connected(2, 3));
    }

    #[test]
    fn test_union_merges_transitively() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(1, 2));
        assert!(uf.connected(0, 2));
        assert!(!uf.connected(0, 3));
        // Merging again is a no-op
        assert!(!uf.union(2, 0));
    }

    #[test]
    fn test_groups_in_discovery_order() {
        let mut uf = UnionFind::new(6);
        uf.union(4, 1);
        uf.union(3, 5);

        let groups = uf.groups();
        assert_eq!(groups, vec![vec![0], vec![1, 4], vec![2], vec![3, 5]]);
    }

    #[test]
    fn test_groups_partition_all_elements() {
        let mut uf = UnionFind::new(50);
        for i in 0..49 {
            if i % 3 == 0 {
                uf.union(i, i + 1);
            }
        }
        let groups = uf.groups();
        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, 50);

        let mut seen = vec![false; 50];
        for group in &groups {
            for &i in group {
                assert!(!seen[i], "element {i} appeared twice");
                seen[i] = true;
            }
        }
    }

    #[test]
    fn test_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert!(uf.groups().is_empty());
    }
}
