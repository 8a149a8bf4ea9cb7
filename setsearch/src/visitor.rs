/// Used to receive set intersection results in a generic way. Inspired by
/// roaring-rs.
pub trait Visitor<T> {
    fn visit(&mut self, value: &T);
}

pub trait Clearable {
    fn clear(&mut self);
}

/// Counts intersection size without storing result.
#[derive(Debug)]
pub struct Counter {
    count: usize,
}

impl<T> Visitor<T> for Counter {
    fn visit(&mut self, _value: &T) {
        self.count += 1;
    }
}

impl Counter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clearable for Counter {
    fn clear(&mut self) {
        self.count = 0;
    }
}

/// Stores intersection result in a vector.
#[derive(Debug)]
pub struct VecWriter<T> {
    items: Vec<T>,
}

impl<T> VecWriter<T> {
    pub fn with_capacity(cardinality: usize) -> Self {
        Self {
            items: Vec::with_capacity(cardinality),
        }
    }
}

impl<T> AsRef<[T]> for VecWriter<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<VecWriter<T>> for Vec<T> {
    fn from(value: VecWriter<T>) -> Self {
        value.items
    }
}

impl<T> Default for VecWriter<T> {
    fn default() -> Self {
        Self { items: Vec::default() }
    }
}

impl<T: Clone> Visitor<T> for VecWriter<T> {
    fn visit(&mut self, value: &T) {
        self.items.push(value.clone());
    }
}

impl<T> Clearable for VecWriter<T> {
    fn clear(&mut self) {
        self.items.clear();
    }
}
