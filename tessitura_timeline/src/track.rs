// Range-indexed storage for one attribute type.
//
// A Bucket pairs a shared attribute object with the half-open beat range
// [begin, end) over which it is active. A Track keeps buckets in insertion
// order and answers "which object is active at this beat" by linear scan.
//
// Overlapping ranges are allowed. When several buckets cover the same beat
// the one inserted first wins, regardless of which range is narrower or
// newer. Callers layer material by inserting the governing object first.

use std::sync::Arc;

/// An attribute object bound to the beats `[begin, end)`.
#[derive(Debug)]
pub struct Bucket<T> {
    object: Arc<T>,
    begin: u32,
    end: u32,
}

impl<T> Bucket<T> {
    /// Callers are expected to pass `begin < end`; `Timeline::add` checks it.
    pub fn new(object: Arc<T>, begin: u32, end: u32) -> Self {
        Bucket { object, begin, end }
    }

    pub fn object(&self) -> &Arc<T> {
        &self.object
    }

    /// True if `beat` falls inside `[begin, end)`.
    pub fn contains(&self, beat: u32) -> bool {
        self.begin <= beat && beat < self.end
    }
}

// Manual impl: cloning a bucket only bumps the Arc, so T need not be Clone.
impl<T> Clone for Bucket<T> {
    fn clone(&self) -> Self {
        Bucket {
            object: Arc::clone(&self.object),
            begin: self.begin,
            end: self.end,
        }
    }
}

/// Insertion-ordered buckets of a single attribute type.
#[derive(Debug)]
pub struct Track<T> {
    buckets: Vec<Bucket<T>>,
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Track { buckets: Vec::new() }
    }
}

impl<T> Track<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bucket. No overlap check is made.
    pub fn add(&mut self, bucket: Bucket<T>) {
        self.buckets.push(bucket);
    }

    /// The object of the first inserted bucket covering `beat`.
    pub fn object_at(&self, beat: u32) -> Option<&Arc<T>> {
        self.buckets
            .iter()
            .find(|bucket| bucket.contains(beat))
            .map(Bucket::object)
    }

    /// The object of the first inserted bucket, ignoring beat ranges.
    ///
    /// Used for whole-piece queries such as the total length, where a single
    /// representative object stands in for the whole track.
    pub fn first_object(&self) -> Option<&Arc<T>> {
        self.buckets.first().map(Bucket::object)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
