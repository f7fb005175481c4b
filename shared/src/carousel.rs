use strum_macros::IntoStaticStr;

/// Where a card sits relative to the centred one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum CardSlot {
    #[strum(serialize = "active")]
    Active,
    #[strum(serialize = "next")]
    Next,
    #[strum(serialize = "prev")]
    Prev,
    #[strum(serialize = "hidden-right")]
    HiddenRight,
    #[strum(serialize = "hidden-left")]
    HiddenLeft,
}

impl CardSlot {
    pub fn class_name(self) -> &'static str {
        self.into()
    }

    pub fn from_distance(distance: isize) -> Self {
        match distance {
            0 => CardSlot::Active,
            1 => CardSlot::Next,
            -1 => CardSlot::Prev,
            d if d > 1 => CardSlot::HiddenRight,
            _ => CardSlot::HiddenLeft,
        }
    }
}

/// Signed distance from `current` to `index`, wrapped to the shorter side.
pub fn circular_distance(index: usize, current: usize, len: usize) -> isize {
    let mut distance = index as isize - current as isize;
    let half = len as f64 / 2.0;
    if distance as f64 > half {
        distance -= len as isize;
    }
    if (distance as f64) < -half {
        distance += len as isize;
    }
    distance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }

    pub fn slot(&self, index: usize) -> CardSlot {
        CardSlot::from_distance(circular_distance(index, self.current, self.len))
    }

    /// Clicking a neighbour brings it to the centre. Returns whether it moved.
    pub fn click(&mut self, index: usize) -> bool {
        match circular_distance(index, self.current, self.len) {
            1 => {
                self.next();
                true
            }
            -1 => {
                self.prev();
                true
            }
            _ => false,
        }
    }
}
