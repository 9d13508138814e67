use derive_new::new;

/// A run where `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl Match {
    pub fn a_end(&self) -> usize {
        self.a + self.size
    }

    pub fn b_end(&self) -> usize {
        self.b + self.size
    }
}

impl From<(usize, usize, usize)> for Match {
    fn from((a, b, size): (usize, usize, usize)) -> Self {
        Self { a, b, size }
    }
}
