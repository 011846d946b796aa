//! Splits a room's member list into groups that each fit on a single names line.

use tracing::warn;

/// Length of `names` joined by a single space.
#[must_use]
pub fn joined_len(names: &[String]) -> usize {
    names.iter().map(String::len).sum::<usize>() + names.len().saturating_sub(1)
}

/// Iterator over contiguous, ordered groups of `names`, where each group joined by
/// spaces fits in whatever is left of the line once the recipient-specific prefix has
/// been written.
///
/// Groups are built greedily: a group is extended one name at a time until the next
/// name would push it over the budget, at which point the group is yielded and that
/// name starts the next one. A name that exactly fills the remaining budget stays in
/// the current group.
///
/// A name that can't fit on a line even by itself is skipped, so every line built
/// from these groups stays within the ceiling. Every other name is yielded exactly
/// once, including the final one.
#[derive(Debug, Clone)]
pub struct NameChunks<'a> {
    names: &'a [String],
    budget: Option<usize>,
}

impl<'a> NameChunks<'a> {
    /// `prefix_len` is the length of a names line rendered with no names in it,
    /// `max_line_bytes` the ceiling for a full line.
    #[must_use]
    pub fn new(names: &'a [String], prefix_len: usize, max_line_bytes: usize) -> Self {
        Self {
            names,
            budget: max_line_bytes.checked_sub(prefix_len),
        }
    }

    /// Bytes available for names on each line, or `None` if the prefix alone is
    /// already over the ceiling.
    #[must_use]
    pub const fn budget(&self) -> Option<usize> {
        self.budget
    }
}

impl<'a> Iterator for NameChunks<'a> {
    type Item = &'a [String];

    fn next(&mut self) -> Option<Self::Item> {
        let budget = self.budget?;

        loop {
            let (first, rest) = self.names.split_first()?;

            if first.len() > budget {
                warn!(
                    nick = %first,
                    len = first.len(),
                    budget,
                    "Skipping member too long to fit in a names reply"
                );
                self.names = rest;
                continue;
            }

            let mut used = first.len();
            let mut end = 1;

            for name in rest {
                let candidate = used + 1 + name.len();
                if candidate > budget {
                    break;
                }

                used = candidate;
                end += 1;
            }

            let (group, remaining) = self.names.split_at(end);
            self.names = remaining;

            return Some(group);
        }
    }
}
