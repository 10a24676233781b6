//! Bring-up routines for the UninaSoC smart-NIC peripherals: a Xilinx CMAC
//! (100G Ethernet MAC with RS-FEC) and the AXI4-Stream FIFO bridge sitting in
//! front of its datapath.
//!
//! Everything in this crate is expressed against the [mmio::Bus32] register
//! bus trait, so the same sequences run unchanged against physical MMIO on
//! the SoC ([mmio::PhysBus]) and against the simulated register space used by
//! the tests ([sim::SimBus], also available to external harnesses via the
//! `sim` cargo feature).
//!
//! Diagnostics go through the `log` facade; the firmware crate backs it with
//! the console UART, tests back it with a capturing logger.

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod axis_fifo;
pub mod bringup;
pub mod cmac;
pub mod mmio;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
