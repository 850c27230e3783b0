// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers and element flags.

/// Identifier for a node in the document (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Boolean element state.
    ///
    /// These mirror the live DOM properties of form controls rather than their
    /// content attributes: `SELECTED` is an option's current selectedness, not its
    /// `selected` attribute.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is disabled (controls, options, buttons, inputs).
        const DISABLED = 0b0000_0001;
        /// Option is currently selected.
        const SELECTED = 0b0000_0010;
        /// Select allows multiple selected options.
        const MULTIPLE = 0b0000_0100;
    }
}
