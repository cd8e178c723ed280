//! Collaborator traits shared across the workspace

use crate::error::Result;
use crate::sample::{Segment, SegmentSelector};

/// Source of sample segments
///
/// Implementations resolve a [`SegmentSelector`] against some record store and
/// signal `RecordNotFound`, `InvalidChannel`, `RangeOutOfBounds` or
/// `MalformedRecord` when the selector cannot be satisfied.
pub trait SegmentLoader {
    /// Load the samples named by `selector`
    fn load(&self, selector: &SegmentSelector) -> Result<Segment>;

    /// Identifiers of every record this loader can serve, sorted
    fn record_ids(&self) -> Result<Vec<String>>;
}

impl<L: SegmentLoader + ?Sized> SegmentLoader for &L {
    fn load(&self, selector: &SegmentSelector) -> Result<Segment> {
        (**self).load(selector)
    }

    fn record_ids(&self) -> Result<Vec<String>> {
        (**self).record_ids()
    }
}

impl<L: SegmentLoader + ?Sized> SegmentLoader for Box<L> {
    fn load(&self, selector: &SegmentSelector) -> Result<Segment> {
        (**self).load(selector)
    }

    fn record_ids(&self) -> Result<Vec<String>> {
        (**self).record_ids()
    }
}
