//! Smart-NIC bring-up firmware for the UninaSoC RISC-V core.
//!
//! Resolves the peripheral base addresses from the linker script, points the
//! `log` facade at the console UART, runs the bring-up sequence once, then
//! parks the hart forever.

#![no_std]
#![no_main]

mod uart;

use core::panic::PanicInfo;
use core::ptr::addr_of;
use log::error;
use riscv_rt::entry;
use smartnic::bringup::{self, PeripheralBases};
use smartnic::mmio::PhysBus;

// Peripheral window locations, defined in memory.x.
extern "C" {
    static _peripheral_UART_start: u32;
    static _peripheral_CMAC_CSR_start: u32;
    static _peripheral_m_acc_start: u32;
}

#[entry]
fn main() -> ! {
    // Safety: the symbols are linker-provided addresses; only their
    // locations are taken, the values are never read.
    let bases = unsafe {
        PeripheralBases {
            uart: addr_of!(_peripheral_UART_start) as u32,
            cmac_csr: addr_of!(_peripheral_CMAC_CSR_start) as u32,
            fifo_data: addr_of!(_peripheral_m_acc_start) as u32,
        }
    };

    // Safety: the base comes from the linker's UART window and nothing else
    // drives the console on this single-hart system.
    unsafe { uart::init(bases.uart) };

    // Safety: the remaining bases map the CMAC CSR and FIFO data windows,
    // and this hart is the only bus master touching them.
    let mut bus = unsafe { PhysBus::new() };
    let _idle = bringup::run(&mut bus, &bases);

    park()
}

/// Parks the hart forever. Terminal: no register access happens after this.
fn park() -> ! {
    loop {
        riscv::asm::wfi();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("{info}");
    park()
}
