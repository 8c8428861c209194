//! Hero carousel.
//!
//! Slides and their indicator dots share one index. The carousel advances on
//! a fixed interval and jumps directly when a dot is tapped; a jump does not
//! restart the interval.
//!
//! Time is passed in as `now_ms`, so the caller owns the clock. A carousel
//! with no slides accepts every call and does nothing.

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    current: usize,
    interval_ms: u64,
    next_due_ms: u64,
}

impl Carousel {
    /// Create a carousel showing slide 0, first advancing at `interval_ms`.
    pub fn new(len: usize, interval_ms: u64) -> Self {
        Self {
            len,
            current: 0,
            interval_ms,
            next_due_ms: interval_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the visible slide, or `None` without slides.
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    /// Show slide `index` (dot tap). Out-of-range indices are ignored.
    pub fn show(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            log::debug!("carousel: no slide {index} (have {})", self.len);
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.len;
        Some(self.current)
    }

    /// Advance once for every interval elapsed by `now_ms`.
    ///
    /// Returns the slide now shown when at least one interval elapsed. Any
    /// number of elapsed intervals is applied in one step.
    pub fn tick(&mut self, now_ms: u64) -> Option<usize> {
        if self.is_empty() || self.interval_ms == 0 || now_ms < self.next_due_ms {
            return None;
        }
        let elapsed = (now_ms - self.next_due_ms) / self.interval_ms + 1;
        let steps = (elapsed % self.len as u64) as usize;
        self.current = (self.current + steps) % self.len;
        self.next_due_ms = self
            .next_due_ms
            .saturating_add(elapsed.saturating_mul(self.interval_ms));
        Some(self.current)
    }
}
