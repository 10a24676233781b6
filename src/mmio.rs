//! Raw 32-bit register access.
//!
//! Register reads have side effects on this hardware (reading the FIFO data
//! port advances its read pointer, for example), so every access must reach
//! the bus exactly once. The [Bus32] trait captures that contract, and
//! [PhysBus] implements it with volatile loads and stores that the compiler
//! is not allowed to reorder, coalesce, or elide.

use core::ptr;

/// A 32-bit register bus.
///
/// Implementations guarantee that each call performs exactly one
/// 32-bit-wide access at the given absolute address, in program order. No
/// caching, no read-combining, no speculative accesses.
pub trait Bus32 {
    /// Performs a single 32-bit load from `addr` and returns the value.
    fn read32(&mut self, addr: u32) -> u32;

    /// Performs a single 32-bit store of `value` to `addr`.
    fn write32(&mut self, addr: u32, value: u32);
}

/// The physical memory-mapped register bus.
///
/// Accesses are unchecked: any address is accepted, and an access to an
/// unmapped or faulty address is a hardware-level fault outside this
/// software's control, not a recoverable error.
pub struct PhysBus {
    _private: (),
}

impl PhysBus {
    /// Creates a handle to the physical register bus.
    ///
    /// # Safety
    ///
    /// The caller guarantees that every address subsequently passed to
    /// [Bus32::read32] / [Bus32::write32] on this handle refers to a mapped,
    /// 4-byte-aligned device register, and that no other context accesses
    /// those registers concurrently.
    pub const unsafe fn new() -> PhysBus {
        PhysBus { _private: () }
    }
}

impl Bus32 for PhysBus {
    fn read32(&mut self, addr: u32) -> u32 {
        // Safety: upheld by the contract of `PhysBus::new`.
        unsafe { ptr::read_volatile(addr as usize as *const u32) }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        // Safety: upheld by the contract of `PhysBus::new`.
        unsafe { ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}
