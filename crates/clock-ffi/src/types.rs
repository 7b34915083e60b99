//! FFI Types - C-compatible type definitions

/// Opaque handle to a clock object (duration, lap, stopwatch or timer)
///
/// Handles are slot indices plus a generation counter. A handle whose slot
/// has been freed or reused no longer matches, so stale handles are rejected
/// instead of dereferenced. Generation 0 is never issued.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHandle {
    pub index: u32,
    pub generation: u32,
}

impl ClockHandle {
    /// The null handle, returned on failure
    pub const NULL: ClockHandle = ClockHandle {
        index: 0,
        generation: 0,
    };

    #[inline]
    pub fn is_null(&self) -> bool {
        self.generation == 0
    }
}

/// Buffer of lap handles returned by `clock_stopwatch_lap_times`
///
/// Owns every contained handle; release it with `clock_lap_buffer_free`.
#[repr(C)]
#[derive(Debug)]
pub struct ClockLapBuffer {
    pub data: *mut ClockHandle,
    pub len: usize,
    pub capacity: usize,
}

impl ClockLapBuffer {
    /// Create from a `Vec<ClockHandle>`, transferring ownership
    pub fn from_vec(v: Vec<ClockHandle>) -> Self {
        let mut v = std::mem::ManuallyDrop::new(v);
        Self {
            data: v.as_mut_ptr(),
            len: v.len(),
            capacity: v.capacity(),
        }
    }

    /// Create an empty buffer
    pub fn empty() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
            capacity: 0,
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.data.is_null()
    }

    /// Reclaim the backing vector
    ///
    /// # Safety
    /// The buffer must come from [`ClockLapBuffer::from_vec`] and must not
    /// have been reclaimed before.
    pub(crate) unsafe fn into_vec(self) -> Vec<ClockHandle> {
        if self.data.is_null() {
            return Vec::new();
        }
        Vec::from_raw_parts(self.data, self.len, self.capacity)
    }
}
