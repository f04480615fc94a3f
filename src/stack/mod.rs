//! Ordered stacks with top-relative addressing.
//!
//! Every collection strata manages, the windows inside a group and the
//! groups themselves, is a `Stack`: a LIFO sequence where index 0 is the
//! top of stack (TOS) and index `n` is n positions below it. The stack is
//! backed by a `Vec` with TOS stored last, so all reordering operations
//! are plain slice operations with no pointer rewiring.

/// A LIFO container addressed from the top of stack down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack<T> {
    // TOS is the last element
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create a new, empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push an item, making it the new TOS.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the TOS, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Peek at the item `n` positions below TOS without removing it.
    pub fn at(&self, n: usize) -> Option<&T> {
        let len = self.items.len();
        if n < len {
            self.items.get(len - 1 - n)
        } else {
            None
        }
    }

    /// Mutable access to the item `n` positions below TOS.
    pub fn at_mut(&mut self, n: usize) -> Option<&mut T> {
        let len = self.items.len();
        if n < len {
            self.items.get_mut(len - 1 - n)
        } else {
            None
        }
    }

    /// Exchange the TOS with the item `n` positions below it.
    ///
    /// A no-op unless `0 < n < len`.
    pub fn swap(&mut self, n: usize) {
        let len = self.items.len();
        if n > 0 && n < len {
            self.items.swap(len - 1, len - 1 - n);
        }
    }

    /// Move the TOS to the bottom of the stack.
    pub fn roll_top(&mut self) {
        if self.items.len() > 1 {
            let tos = self.items.remove(self.items.len() - 1);
            self.items.insert(0, tos);
        }
    }

    /// Move the bottom of the stack to TOS.
    pub fn roll_bottom(&mut self) {
        if self.items.len() > 1 {
            let bottom = self.items.remove(0);
            self.items.push(bottom);
        }
    }

    /// Remove and return the item `n` positions below TOS.
    pub fn remove(&mut self, n: usize) -> Option<T> {
        let len = self.items.len();
        if n < len {
            Some(self.items.remove(len - 1 - n))
        } else {
            None
        }
    }

    /// Top-relative index of the first item matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().rev().position(|item| pred(item))
    }

    /// Iterate from TOS down to the bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Collect in push order: the last item yielded becomes TOS.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests;
