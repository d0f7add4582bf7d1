use std::collections::HashMap;

use super::Replacer;
use crate::{frames::FrameSet, page::Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeIdx(usize);

#[derive(Debug, Clone, Copy)]
struct Node {
    page: Page,
    prev: Option<NodeIdx>,
    next: Option<NodeIdx>,
}

/// Evicts the least recently used page.
///
/// Recency is a doubly-linked list stored in an arena of nodes addressed by
/// index, most recent at the head. The page index maps a resident page to its
/// node so a hit can splice it to the head in O(1). Nodes of evicted pages are
/// recycled through a free list.
#[derive(Debug, Clone, Default)]
pub struct Lru {
    nodes: Vec<Node>,
    free: Vec<NodeIdx>,
    head: Option<NodeIdx>,
    tail: Option<NodeIdx>,
    index: HashMap<Page, NodeIdx>,
}

impl Lru {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resident pages, most recently used first.
    pub fn order(&self) -> impl Iterator<Item = Page> + '_ {
        std::iter::successors(self.head, |idx| self.node(*idx).next).map(|idx| self.node(idx).page)
    }

    fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    fn alloc(&mut self, page: Page) -> NodeIdx {
        let node = Node {
            page,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(idx) => {
                *self.node_mut(idx) = node;
                idx
            }
            None => {
                self.nodes.push(node);
                NodeIdx(self.nodes.len() - 1)
            }
        }
    }

    fn unlink(&mut self, idx: NodeIdx) {
        let Node { prev, next, .. } = *self.node(idx);
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn push_front(&mut self, idx: NodeIdx) {
        let old_head = self.head;
        let node = self.node_mut(idx);
        node.prev = None;
        node.next = old_head;
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl Replacer for Lru {
    fn touch(&mut self, page: Page, _position: usize) {
        let Some(&idx) = self.index.get(&page) else {
            return;
        };
        if self.head != Some(idx) {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn admit(&mut self, page: Page, _position: usize) {
        let idx = self.alloc(page);
        self.push_front(idx);
        self.index.insert(page, idx);
    }

    fn evict(&mut self, _frames: &FrameSet, _position: usize) -> Option<Page> {
        let idx = self.tail?;
        self.unlink(idx);
        self.free.push(idx);
        let page = self.node(idx).page;
        self.index.remove(&page);
        Some(page)
    }
}
