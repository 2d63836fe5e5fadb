//! An ordered sequence that converts inserted containers.
//!
//! Behaves like a plain vector except that every insertion path runs its
//! input through the `Into<Value>` conversions, so plain maps and sequences
//! placed into the list come out as [`AttrMap`](crate::AttrMap) and
//! [`AttrList`] nodes.

use std::ops::{Index, Range};
use std::slice;
use std::vec;

use crate::error::AccessError;
use crate::value::Value;

/// An ordered, mutable sequence of [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrList {
    items: Vec<Value>,
}

impl AttrList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends `value`, converting it on the way in. Never fails.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Inserts `value` before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<(), AccessError> {
        if index > self.items.len() {
            return Err(AccessError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, value.into());
        Ok(())
    }

    /// Replaces the element at `index`.
    pub fn try_set(&mut self, index: usize, value: impl Into<Value>) -> Result<(), AccessError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(AccessError::IndexOutOfRange { index, len }),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Like [`get`](AttrList::get), but reports the offending index.
    pub fn try_get(&self, index: usize) -> Result<&Value, AccessError> {
        self.items.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Returns a copy of `range` as a new list.
    pub fn slice(&self, range: Range<usize>) -> Result<AttrList, AccessError> {
        let len = self.items.len();
        self.items
            .get(range.clone())
            .map(|items| AttrList {
                items: items.to_vec(),
            })
            .ok_or(AccessError::IndexOutOfRange {
                index: range.end,
                len,
            })
    }

    /// Replaces `range` with `values`, returning the removed elements.
    ///
    /// New elements are converted on the way in; the replacement may have a
    /// different length than the range it replaces.
    pub fn splice<I>(&mut self, range: Range<usize>, values: I) -> Result<AttrList, AccessError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let len = self.items.len();
        if range.start > range.end || range.end > len {
            return Err(AccessError::IndexOutOfRange {
                index: range.end,
                len,
            });
        }
        let removed = self
            .items
            .splice(range, values.into_iter().map(Into::into))
            .collect();
        Ok(AttrList { items: removed })
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl Index<usize> for AttrList {
    type Output = Value;

    /// Panics when `index` is out of range, like `Vec`.
    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl<T: Into<Value>> FromIterator<T> for AttrList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        AttrList {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Value>> Extend<T> for AttrList {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<T: Into<Value>> From<Vec<T>> for AttrList {
    fn from(source: Vec<T>) -> Self {
        source.into_iter().collect()
    }
}

impl IntoIterator for AttrList {
    type Item = Value;
    type IntoIter = vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrList {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq<Vec<Value>> for AttrList {
    fn eq(&self, other: &Vec<Value>) -> bool {
        self.items == *other
    }
}

impl PartialEq<AttrList> for Vec<Value> {
    fn eq(&self, other: &AttrList) -> bool {
        other == self
    }
}

impl PartialEq<[Value]> for AttrList {
    fn eq(&self, other: &[Value]) -> bool {
        self.items.as_slice() == other
    }
}

impl PartialEq<AttrList> for [Value] {
    fn eq(&self, other: &AttrList) -> bool {
        self == other.items.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::AttrMap;
    use std::collections::BTreeMap;

    #[test]
    fn test_construction_objectifies_elements() {
        let source: Vec<BTreeMap<String, &str>> =
            vec![BTreeMap::from([("foo".to_string(), "bar")])];
        let list = AttrList::from(source);

        assert!(list[0].is_map());
        assert_eq!(*list[0].as_map().unwrap().attr("foo").unwrap(), "bar");
    }

    #[test]
    fn test_push_and_extend_objectify() {
        let mut list = AttrList::new();
        list.push(BTreeMap::from([("hey".to_string(), "wow")]));
        list.extend(vec![
            BTreeMap::from([("huh".to_string(), "wow")]),
            BTreeMap::from([("third".to_string(), "wow")]),
        ]);

        assert_eq!(list.len(), 3);
        for item in &list {
            assert!(item.is_map());
        }
    }

    #[test]
    fn test_nested_vec_becomes_list() {
        let mut list = AttrList::new();
        list.push(vec![1, 2, 3]);
        assert!(list[0].is_list());
        assert_eq!(list[0].as_list().unwrap()[2], 3);
    }

    #[test]
    fn test_insert_bounds() {
        let mut list: AttrList = vec![1, 2, 4].into_iter().collect();
        list.insert(2, 3).unwrap();
        assert_eq!(list, vec![1, 2, 3, 4].into_iter().collect::<AttrList>());

        // insert-at-len appends
        list.insert(4, 5).unwrap();
        assert_eq!(list[4], 5);

        let err = list.insert(9, 0).unwrap_err();
        assert_eq!(err, AccessError::IndexOutOfRange { index: 9, len: 5 });
    }

    #[test]
    fn test_set_objectifies_and_checks_bounds() {
        let mut list: AttrList = vec![1, 2, 3].into_iter().collect();
        list.try_set(1, BTreeMap::from([("m".to_string(), 1)]))
            .unwrap();
        assert!(list[1].is_map());

        let err = list.try_set(3, 0).unwrap_err();
        assert_eq!(err, AccessError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_read_past_end_fails_append_never_does() {
        let mut list: AttrList = vec![1].into_iter().collect();
        let err = list.try_get(1).unwrap_err();
        assert_eq!(err, AccessError::IndexOutOfRange { index: 1, len: 1 });

        for i in 0..100 {
            list.push(i);
        }
        assert_eq!(list.len(), 101);
    }

    #[test]
    fn test_slice_returns_wrapper_type() {
        let list: AttrList = vec![1, 2, 3, 4].into_iter().collect();
        let middle = list.slice(1..3).unwrap();
        assert_eq!(middle, vec![Value::Int(2), Value::Int(3)]);

        assert!(list.slice(2..9).is_err());
    }

    #[test]
    fn test_splice_objectifies_replacement() {
        let mut list: AttrList = vec![1, 2, 3].into_iter().collect();
        let removed = list
            .splice(1..2, vec![BTreeMap::from([("k".to_string(), 9)])])
            .unwrap();

        assert_eq!(removed, vec![Value::Int(2)]);
        assert!(list[1].is_map());
        assert_eq!(list.len(), 3);

        let err = list.splice(2..9, Vec::<i64>::new()).unwrap_err();
        assert_eq!(err, AccessError::IndexOutOfRange { index: 9, len: 3 });
    }

    #[test]
    fn test_contains() {
        let list: AttrList = vec![1, 2].into_iter().collect();
        assert!(list.contains(&Value::Int(1)));
        assert!(!list.contains(&Value::Int(3)));
    }

    #[test]
    fn test_equality_against_plain_vec_both_directions() {
        let plain = vec![Value::Int(1), Value::Str("x".into())];
        let wrapped: AttrList = plain.iter().cloned().collect();
        assert_eq!(wrapped, plain);
        assert_eq!(plain, wrapped);
    }

    #[test]
    fn test_maps_inside_lists_keep_attribute_access() {
        let mut map = AttrMap::new();
        map.set("hua", vec![BTreeMap::from([("hey".to_string(), "heeey!")])]);

        let elem = map.attr("hua").unwrap().as_list().unwrap()[0]
            .as_map()
            .unwrap();
        assert_eq!(*elem.attr("hey").unwrap(), "heeey!");
    }
}
