use crate::error::SortError;

/// Fixed-capacity FIFO queue that overwrites its oldest element when full.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    len: usize,
    head: usize,
    tail: usize,
}

impl<T> RingBuffer<T> {
    /// # Errors
    ///
    /// Returns [`SortError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, SortError> {
        if capacity == 0 {
            return Err(SortError::ZeroCapacity);
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            len: 0,
            head: 0,
            tail: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value`, returning the evicted oldest element if the buffer was full
    pub fn enqueue(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            // trim head
            let oldest = self.slots[self.head].take();
            self.head = self.advance(self.head);
            oldest
        } else {
            self.len += 1;
            None
        };

        self.slots[self.tail] = Some(value);
        self.tail = self.advance(self.tail);

        evicted
    }

    /// Removes the oldest element
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.head].take();
        self.head = self.advance(self.head);
        self.len -= 1;

        value
    }

    fn advance(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }
}
