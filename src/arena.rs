//! Byte arena backing recorded command payloads.
//!
//! A pass appends one payload per command; headers stay in a parallel list so
//! the arena holds nothing but plain-old-data payload bytes. Growth copies
//! prior contents and payload offsets are aligned to the payload type's
//! natural alignment, tracked explicitly at append time.

use std::mem::{align_of, size_of};

use bytemuck::Pod;

/// Round `value` up to the nearest multiple of `alignment`.
///
/// `alignment` must be > 0.
pub(crate) fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment > 0);
    let add = alignment - 1;
    value.checked_add(add).map(|v| v / alignment * alignment)
}

const INITIAL_CAPACITY: usize = 1024;

pub struct CommandArena {
    data: Vec<u8>,
    write_offset: usize,
    limit: usize,
}

impl CommandArena {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Creates an arena that refuses to grow past `limit` bytes.
    ///
    /// Exhaustion is reported by [`alloc`](Self::alloc) returning `None`; the
    /// caller drops only the offending command.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: vec![0; INITIAL_CAPACITY.min(limit)],
            write_offset: 0,
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Allocated backing size in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// One past the last written payload byte.
    pub fn write_offset(&self) -> usize {
        self.write_offset
    }

    /// Clears the write cursor without shrinking the backing storage.
    pub fn reset(&mut self) {
        self.write_offset = 0;
    }

    /// Allocates `size` bytes at an offset aligned to `alignment`.
    ///
    /// Growth preserves prior contents, doubling the capacity or growing to
    /// exactly fit, whichever is larger.
    pub fn alloc(&mut self, size: usize, alignment: usize) -> Option<usize> {
        let alignment = alignment.max(1);
        let offset = align_up(self.write_offset, alignment)?;
        let end = offset.checked_add(size)?;
        if end > self.limit {
            return None;
        }

        if end > self.data.len() {
            let doubled = self.data.len().saturating_mul(2);
            let new_len = doubled.max(end).min(self.limit);
            self.data.resize(new_len, 0);
        }

        self.write_offset = end;
        Some(offset)
    }

    /// Appends a typed payload, returning its byte offset.
    pub fn write<T: Pod>(&mut self, payload: &T) -> Option<u32> {
        let offset = self.alloc(size_of::<T>(), align_of::<T>())?;
        self.data[offset..offset + size_of::<T>()].copy_from_slice(bytemuck::bytes_of(payload));
        Some(offset as u32)
    }

    /// Reads back a payload previously written at `offset`.
    pub fn read<T: Pod>(&self, offset: u32) -> T {
        let start = offset as usize;
        bytemuck::pod_read_unaligned(&self.data[start..start + size_of::<T>()])
    }

    /// The written portion of the arena.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.write_offset]
    }
}

impl Default for CommandArena {
    fn default() -> Self {
        Self::new()
    }
}
