//! Observation buffer and layout description
//!
//! `ObsWriter` is the single append path for every builder. It is sized up
//! front from the builder's expected length, and `finish` pins the output to
//! that length.
//! When recording, it also notes where each labelled section starts, which
//! is how `ObsLayout` is produced without a second description of the layout.

use std::borrow::Cow;
use std::ops::Deref;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::common::flag;

// =============================================================================
// Observation
// =============================================================================

/// Flat feature vector for one player at one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(Vec<f32>);

impl Observation {
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    /// Values of one layout segment
    pub fn segment(&self, seg: &ObsSegment) -> Option<&[f32]> {
        self.0.get(seg.offset..seg.offset + seg.len)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Deref for Observation {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Observation> for Vec<f32> {
    fn from(obs: Observation) -> Self {
        obs.0
    }
}

// =============================================================================
// Layout
// =============================================================================

/// One labelled, contiguous run of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsSegment {
    pub label: String,
    pub offset: usize,
    pub len: usize,
}

/// Ordered segments covering an observation end to end
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObsLayout {
    pub segments: Vec<ObsSegment>,
}

impl ObsLayout {
    /// Total number of values
    pub fn len(&self) -> usize {
        self.segments.last().map(|s| s.offset + s.len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, label: &str) -> Option<&ObsSegment> {
        self.segments.iter().find(|s| s.label == label)
    }

    /// Segments whose label starts with `prefix`, in order
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ObsSegment> + 'a {
        self.segments.iter().filter(move |s| s.label.starts_with(prefix))
    }
}

// =============================================================================
// ObsWriter
// =============================================================================

/// Append-only, pre-sized observation buffer
#[derive(Debug)]
pub struct ObsWriter {
    values: Vec<f32>,
    marks: Option<Vec<(Cow<'static, str>, usize)>>,
}

impl ObsWriter {
    /// Buffer for a build; no section tracking.
    pub fn with_capacity(len: usize) -> Self {
        Self { values: Vec::with_capacity(len), marks: None }
    }

    /// Buffer that records section starts for `into_layout`.
    pub fn recording(len: usize) -> Self {
        Self { values: Vec::with_capacity(len), marks: Some(Vec::new()) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Start a labelled section at the current position.
    #[inline]
    pub fn section(&mut self, label: &'static str) {
        if let Some(marks) = self.marks.as_mut() {
            marks.push((Cow::Borrowed(label), self.values.len()));
        }
    }

    /// Start a section labelled `prefix[index]`; the label is only formatted when recording.
    #[inline]
    pub fn section_indexed(&mut self, prefix: &'static str, index: usize) {
        if let Some(marks) = self.marks.as_mut() {
            marks.push((Cow::Owned(format!("{}[{}]", prefix, index)), self.values.len()));
        }
    }

    #[inline]
    pub fn push(&mut self, v: f32) {
        self.values.push(v);
    }

    #[inline]
    pub fn push_flag(&mut self, b: bool) {
        self.values.push(flag(b));
    }

    /// Push `v * scale` (3 values)
    #[inline]
    pub fn push_vec3(&mut self, v: &Vector3<f32>, scale: f32) {
        self.values.extend_from_slice(&[v.x * scale, v.y * scale, v.z * scale]);
    }

    #[inline]
    pub fn extend(&mut self, vs: &[f32]) {
        self.values.extend_from_slice(vs);
    }

    #[inline]
    pub fn push_zeros(&mut self, n: usize) {
        self.values.resize(self.values.len() + n, 0.0);
    }

    /// Finish a build at exactly `expected_len` values.
    ///
    /// An encoder that wrote too much is truncated and one that wrote too
    /// little is zero-filled, so callers always get the advertised length.
    pub fn finish(mut self, expected_len: usize) -> Observation {
        if self.values.len() != expected_len {
            error!(
                written = self.values.len(),
                expected = expected_len,
                "observation length differs from its layout"
            );
            self.values.resize(expected_len, 0.0);
        }
        Observation(self.values)
    }

    /// Convert recorded section starts into a layout.
    ///
    /// Empty sections (e.g. no teammates) are dropped.
    pub fn into_layout(self) -> ObsLayout {
        let total = self.values.len();
        let marks = self.marks.unwrap_or_default();
        let mut segments = Vec::with_capacity(marks.len());
        for (i, (label, offset)) in marks.iter().enumerate() {
            let end = marks.get(i + 1).map(|(_, next)| *next).unwrap_or(total);
            if end > *offset {
                segments.push(ObsSegment { label: label.to_string(), offset: *offset, len: end - offset });
            }
        }
        ObsLayout { segments }
    }
}
