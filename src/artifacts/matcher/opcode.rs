use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Equal => "equal",
            Tag::Replace => "replace",
            Tag::Delete => "delete",
            Tag::Insert => "insert",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Turns `a[a_start..a_end]` into `b[b_start..b_end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Opcode {
    pub tag: Tag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl Opcode {
    pub fn a_len(&self) -> usize {
        self.a_end - self.a_start
    }

    pub fn b_len(&self) -> usize {
        self.b_end - self.b_start
    }

    pub fn is_equal(&self) -> bool {
        self.tag == Tag::Equal
    }
}

impl From<(Tag, usize, usize, usize, usize)> for Opcode {
    fn from((tag, a_start, a_end, b_start, b_end): (Tag, usize, usize, usize, usize)) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }
}
