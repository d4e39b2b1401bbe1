//! Session history abstraction.
//!
//! The router only talks to the location bar through [`History`], so the same
//! controller runs against a real browser binding or the in-memory stack used
//! by the server and the tests.

use super::Location;

/// Minimal history API: read the current entry, push a new one, or rewrite
/// the current one in place.
pub trait History {
    fn location(&self) -> Location;

    /// Add a new entry (`pushState`).
    fn push(&mut self, location: Location);

    /// Rewrite the current entry without adding one (`replaceState`).
    fn replace(&mut self, location: Location);
}

/// In-memory history stack with back/forward support.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move one entry back. Returns `false` at the start of the stack.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move one entry forward. Returns `false` at the end of the stack.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Simulate the user editing only the fragment (fires `hashchange` in a
    /// browser). Adds an entry like a real fragment navigation does.
    pub fn set_hash(&mut self, hash: &str) {
        let mut next = self.location();
        next.hash = hash.trim_start_matches('#').to_string();
        self.push(next);
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, location: Location) {
        // Pushing drops any forward entries, like the browser does.
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, location: Location) {
        self.entries[self.cursor] = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back_forward() {
        let mut history = MemoryHistory::new(Location::parse("/"));
        history.push(Location::parse("/blog"));
        history.push(Location::parse("/capela"));
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.location().path, "/blog");
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.location().path, "/");

        assert!(history.forward());
        assert_eq!(history.location().path, "/blog");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new(Location::parse("/"));
        history.push(Location::parse("/blog"));
        history.back();
        history.push(Location::parse("/fotos"));

        assert_eq!(history.len(), 2);
        assert!(!history.forward());
        assert_eq!(history.location().path, "/fotos");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::new(Location::parse("/#admin"));
        history.replace(Location::parse("/"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().hash, "");
    }

    #[test]
    fn test_set_hash() {
        let mut history = MemoryHistory::new(Location::parse("/blog?x=1"));
        history.set_hash("#painel");
        assert_eq!(history.location().to_string(), "/blog?x=1#painel");
        assert_eq!(history.len(), 2);
    }
}
