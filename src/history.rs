//! Fixed-capacity history buffer.
//!
//! Every trace the core keeps (PPG samples, accelerometer axes, movement
//! deltas) is a bounded, arrival-ordered sequence: pushing beyond capacity
//! evicts the oldest element. Memory stays constant for the whole session.

use std::collections::VecDeque;

/// Arrival-ordered buffer holding at most `capacity` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `value`, returning the evicted element if the buffer was full.
    ///
    /// A zero-capacity history keeps nothing and hands `value` straight back.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(value);
        }
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent element.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// Copies the contents out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl BoundedHistory<f32> {
    /// Arithmetic mean, or `None` when empty.
    pub fn mean(&self) -> Option<f32> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.iter().sum::<f32>() / self.items.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity() {
        let mut history = BoundedHistory::new(3);
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.len(), 2);
        assert!(!history.is_full());
        assert_eq!(history.latest(), Some(&2));
    }

    #[test]
    fn test_keeps_most_recent_in_arrival_order() {
        let capacity = 5;
        let mut history = BoundedHistory::new(capacity);
        for n in 0..23 {
            history.push(n);
            assert!(history.len() <= capacity);
        }
        assert_eq!(history.len(), capacity);
        assert_eq!(history.to_vec(), vec![18, 19, 20, 21, 22]);
    }

    #[test]
    fn test_eviction_returns_oldest() {
        let mut history = BoundedHistory::new(2);
        history.push('a');
        history.push('b');
        assert_eq!(history.push('c'), Some('a'));
        assert_eq!(history.to_vec(), vec!['b', 'c']);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = BoundedHistory::new(0);
        assert_eq!(history.push(7), Some(7));
        assert!(history.is_empty());
    }

    #[test]
    fn test_mean() {
        let mut history: BoundedHistory<f32> = BoundedHistory::new(4);
        assert_eq!(history.mean(), None);
        history.push(1.0);
        history.push(3.0);
        assert_eq!(history.mean(), Some(2.0));
    }

    #[test]
    fn test_clear() {
        let mut history = BoundedHistory::new(4);
        history.push(1);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 4);
    }
}
