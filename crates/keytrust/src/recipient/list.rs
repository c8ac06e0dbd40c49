//! Owned list of accepted recipient certificates.

use std::collections::VecDeque;

/// One accepted recipient.
#[derive(Debug)]
pub struct RecipientNode<C> {
    /// The certificate, owned by this node.
    pub cert: C,
    /// Free for downstream consumers; never set while building.
    pub mark: bool,
}

/// Accepted certificates, most recently accepted first.
///
/// The list owns its certificates. Dropping it releases all of them; so does
/// [`RecipientList::release`], which also reports how many it released.
#[derive(Debug)]
pub struct RecipientList<C> {
    nodes: VecDeque<RecipientNode<C>>,
}

impl<C> Default for RecipientList<C> {
    fn default() -> Self {
        Self {
            nodes: VecDeque::new(),
        }
    }
}

impl<C> RecipientList<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `cert` as the new head.
    pub fn push_front(&mut self, cert: C) {
        self.nodes.push_front(RecipientNode { cert, mark: false });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The head node.
    pub fn head(&self) -> Option<&RecipientNode<C>> {
        self.nodes.front()
    }

    /// Nodes in list order.
    pub fn iter(&self) -> impl Iterator<Item = &RecipientNode<C>> {
        self.nodes.iter()
    }

    /// Mutable nodes in list order, for consumers that use `mark`.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RecipientNode<C>> {
        self.nodes.iter_mut()
    }

    /// Certificates in list order.
    pub fn certificates(&self) -> impl Iterator<Item = &C> {
        self.nodes.iter().map(|n| &n.cert)
    }

    /// Release every node and its certificate, head first. Returns the
    /// number of certificates released.
    pub fn release(mut self) -> usize {
        let mut released = 0;
        while let Some(node) = self.nodes.pop_front() {
            drop(node.cert);
            released += 1;
        }
        released
    }
}

impl<C> IntoIterator for RecipientList<C> {
    type Item = C;
    type IntoIter = std::iter::Map<
        std::collections::vec_deque::IntoIter<RecipientNode<C>>,
        fn(RecipientNode<C>) -> C,
    >;

    /// Hand the certificates over to the caller, head first.
    fn into_iter(self) -> Self::IntoIter {
        let take: fn(RecipientNode<C>) -> C = |n| n.cert;
        self.nodes.into_iter().map(take)
    }
}

/// Release `list` and everything it owns. Returns the number of
/// certificates released.
pub fn release_recipient_list<C>(list: RecipientList<C>) -> usize {
    list.release()
}
