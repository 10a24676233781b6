//! Top-level bring-up sequencing.
//!
//! The startup flow is a three-state machine: Uninitialized, Bring-up, Idle.
//! The transition into Bring-up happens once, unconditionally, as soon as the
//! diagnostic sink is ready; the transition into Idle happens unconditionally
//! after the single receive poll, whatever its outcome. Idle is terminal and
//! has no error sibling: nothing in the sequence can report failure. [run]
//! performs the Bring-up state and hands back the [Idle] marker; parking the
//! core is the caller's job.

use crate::mmio::Bus32;
use crate::{axis_fifo, cmac};
use log::info;

/// The base addresses of the three peripheral windows, resolved once at
/// startup and immutable afterwards.
#[derive(Clone, Copy, Debug)]
pub struct PeripheralBases {
    /// Console UART register window. Consumed by the diagnostic sink, not by
    /// the bring-up sequences themselves.
    pub uart: u32,
    /// CMAC control/status window. The AXI-Stream FIFO CSRs sit inside this
    /// window, so it serves both bring-up routines.
    pub cmac_csr: u32,
    /// AXI-Stream FIFO data window.
    pub fifo_data: u32,
}

/// Proof that the bring-up sequence has run to completion.
///
/// This is the terminal state of the startup flow: once the owner holds an
/// [Idle], no further register access ever happens and the core is expected
/// to park forever.
#[must_use]
#[derive(Debug)]
pub struct Idle {
    _private: (),
}

/// Runs the whole bring-up once: CMAC datapath enable, FIFO interrupt reset,
/// then a single receive poll.
pub fn run<B: Bus32>(bus: &mut B, bases: &PeripheralBases) -> Idle {
    info!("Trying to init the CMAC...");

    cmac::init(bus, bases.cmac_csr);
    axis_fifo::init(bus, bases.cmac_csr);

    axis_fifo::poll_rx(bus, bases.cmac_csr, bases.fifo_data);

    Idle { _private: () }
}
