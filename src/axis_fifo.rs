//! The AXI4-Stream FIFO bridge: interrupt reset sequence and a single-shot
//! receive poll.
//!
//! The FIFO's control/status registers live in a window at
//! [CSR_WINDOW] within the CMAC CSR region, so both routines here take the
//! CMAC CSR base address. The data ports live in a separate region of their
//! own (the `data_base` argument of [poll_rx]).

use crate::mmio::Bus32;
use log::{debug, info};

/// Offset of the FIFO CSR window within the CMAC CSR region.
const CSR_WINDOW: u32 = 0x1_0000;

/// Interrupt status register (write-1-to-clear).
pub const ISR: u32 = CSR_WINDOW;
/// Interrupt enable register.
pub const IER: u32 = CSR_WINDOW + 0x4;
/// Transmit data FIFO vacancy register.
pub const TDFV: u32 = CSR_WINDOW + 0xC;
/// Receive data FIFO occupancy register.
pub const RDFO: u32 = CSR_WINDOW + 0x1C;
/// Receive length register.
pub const RLR: u32 = CSR_WINDOW + 0x24;
/// Receive destination register.
pub const RDR: u32 = CSR_WINDOW + 0x30;

/// Transmit data port, relative to the data region base. Unused by the
/// receive-only flow but part of the hardware map.
pub const TX_DATA: u32 = 0x0;
/// Receive data port, relative to the data region base. Each read pops one
/// word from the FIFO.
pub const RX_DATA: u32 = 0x1000;

/// Clears every latched interrupt bit.
const ISR_CLEAR_ALL: u32 = 0xFFFF_FFFF;

/// Resets the FIFO's interrupt state and samples its capacity registers.
///
/// The leading ISR read is required even though the value is discarded; it
/// arms the clear on some hardware revisions. The trailing reads of IER,
/// TDFV and RDFO are diagnostic samples with no software-visible effect.
// TODO: the missing precondition checks flagged in cmac::init apply to this
// sequence as well; the accesses are issued unconditionally.
pub fn init<B: Bus32>(bus: &mut B, base: u32) {
    let _ = bus.read32(base + ISR);
    bus.write32(base + ISR, ISR_CLEAR_ALL);
    let _ = bus.read32(base + ISR);
    let _ = bus.read32(base + IER);
    let _ = bus.read32(base + TDFV);
    let _ = bus.read32(base + RDFO);
    debug!("AXI-Stream FIFO interrupt state cleared");
}

/// Polls the FIFO once for a received frame, printing the interrupt status,
/// occupancy, length and destination as it goes.
///
/// The occupancy is read twice: once as a diagnostic sample and once, after
/// the metadata reads, as the value that gates the data read (hardware may
/// have queued more words in between). If the second occupancy is non-zero,
/// exactly one word is popped from the receive data port; this is a
/// single-shot diagnostic, deliberately not a drain loop.
pub fn poll_rx<B: Bus32>(bus: &mut B, csr_base: u32, data_base: u32) {
    let isr = bus.read32(csr_base + ISR);
    info!("RX ISR: {isr}");

    bus.write32(csr_base + ISR, ISR_CLEAR_ALL);

    let isr = bus.read32(csr_base + ISR);
    info!("RX ISR: {isr}");

    let occupancy = bus.read32(csr_base + RDFO);
    info!("RX OCC: {occupancy}");

    let len = bus.read32(csr_base + RLR);
    info!("RX LEN: {len}");

    let dest = bus.read32(csr_base + RDR);
    info!("RX DEST: {dest}");

    let occupancy = bus.read32(csr_base + RDFO);
    info!("RX OCC: {occupancy}");

    if occupancy > 0 {
        let data = bus.read32(data_base + RX_DATA);
        info!("DATA: {data}");
    }
}
