use std::ops::AddAssign;

// Arithmetic sequence [start, end) advancing by a fixed stride.
// Iteration stops only when the cursor lands exactly on `end`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Range<T> {
    start: T,
    end: T,
    stride: T,
}

pub trait One {
    const ONE: Self;
}

macro_rules! impl_one {
    ($($t:ty),*) => {
        $(impl One for $t {
            const ONE: Self = 1;
        })*
    };
}

impl_one!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Copy + PartialEq + AddAssign + One> Range<T> {
    pub fn new(start: T, end: T) -> Self {
        Self::with_stride(start, end, T::ONE)
    }
}

impl<T: Copy + PartialEq + AddAssign> Range<T> {
    pub fn with_stride(start: T, end: T, stride: T) -> Self {
        Range { start, end, stride }
    }

    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self.start, self.stride)
    }

    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.end, self.stride)
    }

    pub fn stride(&self) -> T {
        self.stride
    }

    pub fn iter(&self) -> Iter<T> {
        Iter {
            cursor: self.begin(),
            end: self.end(),
        }
    }
}

impl<T: Copy + PartialEq + AddAssign> IntoIterator for Range<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Copy + PartialEq + AddAssign> IntoIterator for &Range<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

// Equality looks at the current value only; the stride is ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cursor<T> {
    value: T,
    stride: T,
}

impl<T: Copy + AddAssign> Cursor<T> {
    pub fn new(value: T, stride: T) -> Self {
        Cursor { value, stride }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn pre_increment(&mut self) -> T {
        self.value += self.stride;
        self.value
    }

    // Returns the value from before the step.
    pub fn post_increment(&mut self) -> T {
        let old = self.value;
        self.value += self.stride;
        old
    }
}

impl<T: PartialEq> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Cursor<T> {}

#[derive(Copy, Clone, Debug)]
pub struct Iter<T> {
    cursor: Cursor<T>,
    end: Cursor<T>,
}

impl<T: Copy + PartialEq + AddAssign> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.cursor == self.end {
            return None;
        }
        Some(self.cursor.post_increment())
    }
}
