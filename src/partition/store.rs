// store.rs
// ──────────────────────────────────────────────────────────────────────────────
// Disjoint-set (union-find) store over arbitrary elements.  Elements are
// identified by a key computed by a caller-supplied function; two elements
// with equal keys are the same member of the partition.  Entries live in an
// arena and link to their parent by index, so the representative chain is a
// forest of indices.  `find` compresses every chain it walks and `union`
// links the smaller tree under the larger one.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;

use super::error::PartitionError;

/// A registered member of the partition.
#[derive(Clone, Debug)]
pub struct Entry<T, K> {
    element: T,
    key: K,
    parent: usize,
    size: usize, // Only meaningful on roots
}

impl<T, K> Entry<T, K> {
    /// The element value as it was passed to `make_set`.
    pub fn element(&self) -> &T {
        &self.element
    }

    /// The key derived from the element. On a root entry this is the
    /// representative key of the whole set.
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Partition of registered elements into disjoint sets.
///
/// `F` derives the identity key of an element. It must be deterministic and
/// collision-free over the elements the caller registers.
pub struct PartitionStore<T, K, F> {
    key_of: F,
    entries: Vec<Entry<T, K>>,
    index: HashMap<K, usize>,
    set_count: usize,
}

impl<T, K, F> PartitionStore<T, K, F>
where
    K: Eq + Hash + Clone + Debug,
    F: Fn(&T) -> K,
{
    pub fn new(key_of: F) -> Self {
        Self {
            key_of,
            entries: Vec::new(),
            index: HashMap::new(),
            set_count: 0,
        }
    }

    /// Registers `elements` as the members of one new set.
    ///
    /// The first element becomes the representative. The whole batch is
    /// validated before anything is inserted, so on error the store is
    /// unchanged.
    ///
    /// # Errors
    /// * `PartitionError::EmptySet` if `elements` is empty.
    /// * `PartitionError::DuplicateKey` if any key is already registered or
    ///   appears twice in the batch.
    pub fn make_set<I>(&mut self, elements: I) -> Result<(), PartitionError>
    where
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(PartitionError::EmptySet);
        }

        let keys: Vec<K> = elements.iter().map(&self.key_of).collect();
        {
            let mut batch = HashSet::with_capacity(keys.len());
            for key in &keys {
                if self.index.contains_key(key) || !batch.insert(key) {
                    return Err(PartitionError::DuplicateKey(format!("{key:?}")));
                }
            }
        }

        let root = self.entries.len();
        let size = elements.len();
        for (element, key) in elements.into_iter().zip(keys) {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push(Entry {
                element,
                key,
                parent: root,
                size: 0,
            });
        }
        self.entries[root].size = size;
        self.set_count += 1;
        Ok(())
    }

    /// Resolves the root entry of the set containing `key`, compressing the
    /// path walked on the way.
    ///
    /// # Errors
    /// Returns `PartitionError::UnknownKey` if `key` was never registered.
    pub fn find(&mut self, key: &K) -> Result<&Entry<T, K>, PartitionError> {
        let start = self.lookup(key)?;
        let root = self.resolve(start);
        Ok(&self.entries[root])
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` without changing the partition when both are already
    /// in the same set. Which root survives the merge is unspecified.
    ///
    /// # Errors
    /// Returns `PartitionError::UnknownKey` if either element was never registered.
    pub fn union(&mut self, a: &T, b: &T) -> Result<bool, PartitionError> {
        let key_a = (self.key_of)(a);
        let key_b = (self.key_of)(b);
        self.union_keys(&key_a, &key_b)
    }

    /// Same as [`PartitionStore::union`], addressed by key.
    pub fn union_keys(&mut self, a: &K, b: &K) -> Result<bool, PartitionError> {
        // Both lookups happen before any mutation.
        let start_a = self.lookup(a)?;
        let start_b = self.lookup(b)?;

        let root_a = self.resolve(start_a);
        let root_b = self.resolve(start_b);
        if root_a == root_b {
            return Ok(false);
        }

        let (parent, child) = if self.entries[root_a].size >= self.entries[root_b].size {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.entries[child].parent = parent;
        self.entries[parent].size += self.entries[child].size;
        self.set_count -= 1;
        Ok(true)
    }

    /// Returns whether `a` and `b` currently belong to the same set.
    pub fn same_set(&mut self, a: &K, b: &K) -> Result<bool, PartitionError> {
        let start_a = self.lookup(a)?;
        let start_b = self.lookup(b)?;
        Ok(self.resolve(start_a) == self.resolve(start_b))
    }

    /// Number of members in the set containing `key`.
    pub fn set_size(&mut self, key: &K) -> Result<usize, PartitionError> {
        let start = self.lookup(key)?;
        let root = self.resolve(start);
        Ok(self.entries[root].size)
    }

    /// Enumerates every set as the list of its element values.
    ///
    /// Sets appear in the order their earliest-registered member was
    /// registered; members within a set keep registration order. Every
    /// chain is fully compressed as a side effect.
    pub fn sets(&mut self) -> Vec<Vec<&T>> {
        let mut groups: Vec<Vec<usize>> = Vec::with_capacity(self.set_count);
        let mut slot_of_root: HashMap<usize, usize> = HashMap::with_capacity(self.set_count);

        for idx in 0..self.entries.len() {
            let root = self.resolve(idx);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(idx);
        }

        let entries = &self.entries;
        groups
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .map(|idx| &entries[idx].element)
                    .collect()
            })
            .collect()
    }

    /// Number of disjoint sets currently in the partition.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn lookup(&self, key: &K) -> Result<usize, PartitionError> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| PartitionError::UnknownKey(format!("{key:?}")))
    }

    /// Walks parent links from `start` to its root, then points every entry
    /// visited on the way directly at that root.
    fn resolve(&mut self, start: usize) -> usize {
        let mut root = start;
        while self.entries[root].parent != root {
            root = self.entries[root].parent;
        }

        let mut current = start;
        while current != root {
            let next = self.entries[current].parent;
            self.entries[current].parent = root;
            current = next;
        }
        root
    }
}

impl<T, K: Debug, F> Debug for PartitionStore<T, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            map.entry(&entry.key, &self.entries[entry.parent].key);
        }
        map.finish()
    }
}
