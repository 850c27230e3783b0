// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Fxd Dom.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! A [`Document`] is its own parent lookup, so a router over a borrowed document
//! reconstructs full root→target paths. Detached subtrees route up to their own top
//! node; stale ids produce a singleton path.

use fxd_dom::{Document, NodeId};

use crate::router::Router;
use crate::types::ParentLookup;

impl ParentLookup<NodeId> for Document {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent_of(self, *node)
    }
}

/// A router that walks the ancestry of `doc`.
pub fn router(doc: &Document) -> Router<NodeId, &Document> {
    Router::with_parent(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use alloc::vec::Vec;

    #[test]
    fn routes_through_document_ancestry() {
        let mut doc = Document::new();
        let wrapper = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(doc.root(), wrapper);
        doc.append_child(wrapper, button);

        let seq = router(&doc).dispatch_for(button, true);
        let steps: Vec<(Phase, NodeId)> = seq.iter().map(|d| (d.phase, d.node)).collect();
        assert_eq!(
            steps,
            [
                (Phase::Capture, doc.root()),
                (Phase::Capture, wrapper),
                (Phase::Target, button),
                (Phase::Bubble, wrapper),
                (Phase::Bubble, doc.root()),
            ]
        );
    }

    #[test]
    fn stale_ids_route_as_singletons() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div);
        doc.remove(div);
        let seq = router(&doc).dispatch_for(div, true);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].phase, Phase::Target);
    }
}
