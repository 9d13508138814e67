use crate::artifacts::matcher::opcode::{Opcode, Tag};

/// Lazily splits opcodes into hunks
///
/// Leading and trailing equal runs are trimmed to `context` elements; an
/// equal run longer than twice the context ends the current hunk and starts
/// the next one. A hunk made of a single equal run is never produced, so
/// identical or empty inputs yield no hunks at all.
#[derive(Debug, Clone)]
pub struct GroupedOpcodes {
    codes: std::vec::IntoIter<Opcode>,
    context: usize,
    group: Vec<Opcode>,
    exhausted: bool,
}

impl GroupedOpcodes {
    pub fn new(opcodes: &[Opcode], context: usize) -> Self {
        let mut codes = if opcodes.is_empty() {
            vec![Opcode::new(Tag::Equal, 0, 1, 0, 1)]
        } else {
            opcodes.to_vec()
        };

        if let Some(first) = codes.first_mut().filter(|code| code.is_equal()) {
            first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
            first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
        }
        if let Some(last) = codes.last_mut().filter(|code| code.is_equal()) {
            last.a_end = last.a_end.min(last.a_start + context);
            last.b_end = last.b_end.min(last.b_start + context);
        }

        Self {
            codes: codes.into_iter(),
            context,
            group: Vec::new(),
            exhausted: false,
        }
    }
}

impl Iterator for GroupedOpcodes {
    type Item = Vec<Opcode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let n = self.context;
        for mut code in self.codes.by_ref() {
            if code.is_equal() && code.a_len() > 2 * n {
                self.group.push(Opcode::new(
                    Tag::Equal,
                    code.a_start,
                    code.a_end.min(code.a_start + n),
                    code.b_start,
                    code.b_end.min(code.b_start + n),
                ));
                code.a_start = code.a_start.max(code.a_end - n);
                code.b_start = code.b_start.max(code.b_end - n);
                return Some(std::mem::replace(&mut self.group, vec![code]));
            }
            self.group.push(code);
        }

        self.exhausted = true;
        let group = std::mem::take(&mut self.group);
        match group.as_slice() {
            [] => None,
            [only] if only.is_equal() => None,
            _ => Some(group),
        }
    }
}
