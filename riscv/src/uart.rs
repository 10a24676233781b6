//! Console output over the SoC's Xilinx AXI UART Lite, exposed through the
//! `log` facade.

use core::cell::RefCell;
use core::fmt::{self, Write};
use critical_section::Mutex;
use log::LevelFilter;
use smartnic::mmio::{Bus32, PhysBus};

/// Transmit FIFO data register.
const TX_FIFO: u32 = 0x4;
/// Status register.
const STAT_REG: u32 = 0x8;
/// Status bit: transmit FIFO is full.
const STAT_TX_FULL: u32 = 1 << 3;

/// A write-only handle to the UART Lite console.
struct Uart {
    base: u32,
    bus: PhysBus,
}

impl Uart {
    /// # Safety
    ///
    /// `base` must be the start of a mapped AXI UART Lite register window.
    unsafe fn new(base: u32) -> Uart {
        Uart {
            base,
            bus: PhysBus::new(),
        }
    }

    fn put_byte(&mut self, byte: u8) {
        while self.bus.read32(self.base + STAT_REG) & STAT_TX_FULL != 0 {}
        self.bus.write32(self.base + TX_FIFO, u32::from(byte));
    }
}

impl Write for Uart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            // The console expects CRLF line endings.
            if byte == b'\n' {
                self.put_byte(b'\r');
            }
            self.put_byte(byte);
        }
        Ok(())
    }
}

static CONSOLE: Mutex<RefCell<Option<Uart>>> = Mutex::new(RefCell::new(None));

struct UartLogger;

static LOGGER: UartLogger = UartLogger;

impl log::Log for UartLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        critical_section::with(|cs| {
            if let Some(uart) = CONSOLE.borrow_ref_mut(cs).as_mut() {
                // The UART never reports errors; a failed write has nowhere
                // to go anyway.
                let _ = writeln!(uart, "{}", record.args());
            }
        });
    }

    fn flush(&self) {}
}

/// Initializes the console at `base` and installs it as the `log` sink.
/// Called once at startup, before any diagnostic is emitted.
///
/// # Safety
///
/// `base` must be the start of a mapped AXI UART Lite register window, and
/// nothing else may drive that UART afterwards.
pub unsafe fn init(base: u32) {
    let uart = Uart::new(base);
    critical_section::with(|cs| {
        *CONSOLE.borrow_ref_mut(cs) = Some(uart);
    });
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
