//! A simulated 32-bit register space for exercising the bring-up sequences
//! off-target.
//!
//! Plain addresses behave like memory: a write stores the value and a read
//! returns it. On top of that the simulation models the two side-effecting
//! register kinds this hardware has:
//!
//! - write-1-to-clear registers (the FIFO interrupt status), where a write
//!   clears the written bits instead of storing them, and
//! - read-to-pop stream registers (the FIFO receive data port), where each
//!   read consumes one queued word.
//!
//! Every access is also appended to a log of [Access] records, so tests can
//! assert the exact order of the traffic a sequence puts on the bus.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::mmio::Bus32;

/// One observed bus access, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// A 32-bit load and the value it returned.
    Read { addr: u32, value: u32 },
    /// A 32-bit store and the value it carried.
    Write { addr: u32, value: u32 },
}

impl Access {
    /// The address this access targeted, regardless of its kind.
    pub fn addr(&self) -> u32 {
        match *self {
            Access::Read { addr, .. } | Access::Write { addr, .. } => addr,
        }
    }
}

/// A simulated register space. Unwritten addresses read as zero.
#[derive(Default)]
pub struct SimBus {
    mem: BTreeMap<u32, u32>,
    w1c: BTreeSet<u32>,
    fixed: BTreeMap<u32, u32>,
    streams: BTreeMap<u32, VecDeque<u32>>,
    log: Vec<Access>,
}

impl SimBus {
    /// Creates an all-zero register space with no side-effecting registers.
    pub fn new() -> SimBus {
        SimBus::default()
    }

    /// Presets the stored value at `addr` without logging an access.
    pub fn preset(&mut self, addr: u32, value: u32) {
        self.mem.insert(addr, value);
    }

    /// Marks `addr` as write-1-to-clear: a write clears the written bits of
    /// the stored value instead of replacing it.
    pub fn mark_w1c(&mut self, addr: u32) {
        self.w1c.insert(addr);
    }

    /// Pins `addr` to always read as `value`. Writes to it are ignored.
    pub fn set_fixed(&mut self, addr: u32, value: u32) {
        self.fixed.insert(addr, value);
    }

    /// Queues `value` on the read-to-pop stream register at `addr`. Each
    /// read of the register consumes one queued word; an empty stream reads
    /// as zero.
    pub fn push_stream(&mut self, addr: u32, value: u32) {
        self.streams.entry(addr).or_default().push_back(value);
    }

    /// The stored value at `addr` (zero if never written), without logging
    /// an access.
    pub fn value(&self, addr: u32) -> u32 {
        self.mem.get(&addr).copied().unwrap_or(0)
    }

    /// Every access performed so far, in program order.
    pub fn accesses(&self) -> &[Access] {
        &self.log
    }

    /// The number of queued words left on the stream register at `addr`.
    pub fn stream_len(&self, addr: u32) -> usize {
        self.streams.get(&addr).map_or(0, VecDeque::len)
    }
}

impl SimBus {
    fn read_value(&mut self, addr: u32) -> u32 {
        if let Some(fixed) = self.fixed.get(&addr) {
            return *fixed;
        }
        if let Some(stream) = self.streams.get_mut(&addr) {
            return stream.pop_front().unwrap_or(0);
        }
        self.value(addr)
    }
}

impl Bus32 for SimBus {
    fn read32(&mut self, addr: u32) -> u32 {
        let value = self.read_value(addr);
        self.log.push(Access::Read { addr, value });
        value
    }

    fn write32(&mut self, addr: u32, value: u32) {
        if self.w1c.contains(&addr) {
            let cleared = self.value(addr) & !value;
            self.mem.insert(addr, cleared);
        } else if !self.fixed.contains_key(&addr) {
            self.mem.insert(addr, value);
        }
        self.log.push(Access::Write { addr, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Plain addresses behave like memory: a write followed by a read of the
    // same address round-trips the value, and untouched addresses read zero.
    #[test]
    fn plain_registers_round_trip() {
        let mut bus = SimBus::new();
        assert_eq!(bus.read32(0x40), 0);
        bus.write32(0x40, 0x1234_5678);
        assert_eq!(bus.read32(0x40), 0x1234_5678);
        assert_eq!(
            bus.accesses(),
            &[
                Access::Read { addr: 0x40, value: 0 },
                Access::Write { addr: 0x40, value: 0x1234_5678 },
                Access::Read { addr: 0x40, value: 0x1234_5678 },
            ]
        );
    }

    // A write-1-to-clear register clears only the written bits; an all-ones
    // write clears everything.
    #[test]
    fn w1c_register_clears_written_bits() {
        let mut bus = SimBus::new();
        bus.mark_w1c(0x80);
        bus.preset(0x80, 0b1011);
        bus.write32(0x80, 0b0010);
        assert_eq!(bus.read32(0x80), 0b1001);
        bus.write32(0x80, 0xFFFF_FFFF);
        assert_eq!(bus.read32(0x80), 0);
    }

    // Each read of a stream register pops one queued word; once drained it
    // reads as zero.
    #[test]
    fn stream_register_pops_one_word_per_read() {
        let mut bus = SimBus::new();
        bus.push_stream(0x1000, 0xAAAA_0001);
        bus.push_stream(0x1000, 0xAAAA_0002);
        assert_eq!(bus.stream_len(0x1000), 2);
        assert_eq!(bus.read32(0x1000), 0xAAAA_0001);
        assert_eq!(bus.read32(0x1000), 0xAAAA_0002);
        assert_eq!(bus.stream_len(0x1000), 0);
        assert_eq!(bus.read32(0x1000), 0);
    }

    // A pinned register always reads its fixed value and ignores writes.
    #[test]
    fn fixed_register_ignores_writes() {
        let mut bus = SimBus::new();
        bus.set_fixed(0xC0, 5);
        assert_eq!(bus.read32(0xC0), 5);
        bus.write32(0xC0, 99);
        assert_eq!(bus.read32(0xC0), 5);
    }
}
