use std::borrow::Borrow;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

/// Ordered set of unique elements. Ordering and equality come from the
/// element's `Ord` impl, so the element type decides what "equal" means
/// (postings compare by path, spam-filter words case-insensitively).
///
/// `union`, `intersection` and `difference` never touch their operands and
/// always keep the left operand's element when both sides hold an equal one.
pub struct Set<T> {
    items: BTreeSet<T>,
}

impl<T: Ord> Set<T> {
    pub fn new() -> Self {
        Self { items: BTreeSet::new() }
    }

    /// Adds `elem` unless an equal element is already present. Returns whether it was added.
    pub fn add(&mut self, elem: T) -> bool {
        self.items.insert(elem)
    }

    pub fn contains<Q>(&self, elem: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.contains(elem)
    }

    pub fn get<Q>(&self, elem: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.get(elem)
    }

    /// Removes and returns the element equal to `elem`, if any.
    pub fn take<Q>(&mut self, elem: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.take(elem)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.items.iter()
    }

    /// A set of references to this set's elements. Nothing is copied.
    pub fn view(&self) -> Set<&T> {
        Set { items: self.items.iter().collect() }
    }
}

impl<T: Ord + Clone> Set<T> {
    /// Elements in either set.
    pub fn union(&self, other: &Set<T>) -> Set<T> {
        let mut items = self.items.clone();
        for elem in other.iter() {
            if !items.contains(elem) {
                items.insert(elem.clone());
            }
        }
        Set { items }
    }

    /// Elements in both sets.
    pub fn intersection(&self, other: &Set<T>) -> Set<T> {
        self.iter().filter(|elem| other.contains(*elem)).cloned().collect()
    }

    /// Elements in `self` that are not in `other`.
    pub fn difference(&self, other: &Set<T>) -> Set<T> {
        self.iter().filter(|elem| !other.contains(*elem)).cloned().collect()
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self { items: self.items.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: Ord> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Ord> Eq for Set<T> {}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.add(elem);
        }
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
