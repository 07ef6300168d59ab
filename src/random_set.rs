//! A set that can hand back a uniformly random member in constant time.
//!
//! Members live in a dense vector and a map records each member's slot in it. Add, remove and
//! random pick are expected O(1); every member is stored twice.

use rand::Rng;
use std::fmt;
use std::hash::Hash;

use crate::utils::{self, FnvHashMap};

#[derive(Clone)]
pub struct RandomSelectionSet<T> {
    items: Vec<T>,
    indices: FnvHashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> RandomSelectionSet<T> {
    pub fn new() -> RandomSelectionSet<T> {
        RandomSelectionSet::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> RandomSelectionSet<T> {
        RandomSelectionSet {
            items: Vec::with_capacity(capacity),
            indices: utils::fnv_hashmap(capacity),
        }
    }

    /// Insert a value. Returns false, leaving the set untouched, if it was already present.
    pub fn add(&mut self, value: T) -> bool {
        if self.indices.contains_key(&value) {
            return false;
        }
        self.indices.insert(value.clone(), self.items.len());
        self.items.push(value);
        true
    }

    /// Remove a value. Returns false if it was not a member.
    ///
    /// The last member is moved into the vacated slot, so member order is not stable.
    pub fn remove(&mut self, value: &T) -> bool {
        let index = match self.indices.remove(value) {
            Some(index) => index,
            None => return false,
        };

        self.items.swap_remove(index);
        if let Some(moved) = self.items.get(index) {
            self.indices.insert(moved.clone(), index);
        }
        true
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.indices.contains_key(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A uniformly random member, or None if the set is empty.
    pub fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.items.is_empty() {
            None
        } else {
            self.items.get(rng.gen_range(0..self.items.len()))
        }
    }

    /// Members in no particular order.
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.items.iter()
    }
}

impl<T: Hash + Eq + Clone> Default for RandomSelectionSet<T> {
    fn default() -> Self {
        RandomSelectionSet::new()
    }
}

impl<T: Hash + Eq + Clone> std::iter::FromIterator<T> for RandomSelectionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RandomSelectionSet::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

impl<T: fmt::Debug> fmt::Debug for RandomSelectionSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
