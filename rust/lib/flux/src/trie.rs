use std::collections::HashMap;
use std::sync::RwLock;

/// Topic trie with MQTT-style wildcards, shared by the request router and
/// the state subscription table.
///
/// - `+` matches exactly one level
/// - `#` matches any number of remaining levels, including none, and must be
///   the last segment
///
/// Levels are separated by `/`: `movies/search`, `movies/+`, `movies/#`, `#`.
pub struct Trie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    literal: HashMap<String, Node<T>>,
    single: Option<Box<Node<T>>>,
    /// Values registered with a trailing `#` at this level.
    rest: Vec<T>,
    /// Values whose pattern ends exactly at this level.
    here: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literal: HashMap::new(),
            single: None,
            rest: Vec::new(),
            here: Vec::new(),
        }
    }
}

impl<T: Clone> Trie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::default()),
        }
    }

    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in pattern.split('/') {
            match segment {
                "#" => {
                    node.rest.push(value);
                    return;
                }
                "+" => node = &mut **node.single.get_or_insert_with(Box::default),
                literal => node = node.literal.entry(literal.to_string()).or_default(),
            }
        }
        node.here.push(value);
    }

    /// All values whose pattern matches the concrete `topic`, in pattern
    /// specificity order: exact, then `+`, then `#` branches per level.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        let segments: Vec<&str> = topic.split('/').collect();
        let mut out = Vec::new();
        root.collect(&segments, &mut out);
        out
    }

    /// Drop values registered under exactly `pattern` that satisfy
    /// `predicate`. Returns whether anything was removed.
    pub fn remove<F>(&self, pattern: &str, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in pattern.split('/') {
            let next = match segment {
                "#" => return retain_not(&mut node.rest, &predicate),
                "+" => node.single.as_deref_mut(),
                literal => node.literal.get_mut(literal),
            };
            match next {
                Some(child) => node = child,
                None => return false,
            }
        }
        retain_not(&mut node.here, &predicate)
    }

    pub fn is_empty(&self) -> bool {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        root.is_empty()
    }
}

impl<T: Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Node<T> {
    fn collect(&self, segments: &[&str], out: &mut Vec<T>) {
        let Some((first, tail)) = segments.split_first() else {
            out.extend(self.here.iter().cloned());
            out.extend(self.rest.iter().cloned());
            return;
        };
        if let Some(child) = self.literal.get(*first) {
            child.collect(tail, out);
        }
        if let Some(child) = &self.single {
            child.collect(tail, out);
        }
        out.extend(self.rest.iter().cloned());
    }

    fn is_empty(&self) -> bool {
        self.here.is_empty()
            && self.rest.is_empty()
            && self.single.as_ref().map_or(true, |n| n.is_empty())
            && self.literal.values().all(Node::is_empty)
    }
}

fn retain_not<T, F: Fn(&T) -> bool>(values: &mut Vec<T>, predicate: &F) -> bool {
    let before = values.len();
    values.retain(|v| !predicate(v));
    values.len() < before
}
