//! Leadlink - ECG Lead-Quality Monitor
//!
//! Main firmware binary for an RP2040 board with an AD8232 ECG front end,
//! a 20x4 I2C character LCD and a UART link to a host computer.
//!
//! Everything runs in the main task: one monitor cycle per tick, no other
//! tasks are spawned.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use leadlink_core::config::MonitorConfig;
use leadlink_core::leads::LeadFaultDetector;
use leadlink_core::monitor::{CycleFault, CycleReport, Monitor};
use leadlink_core::presenter::Presenter;
use leadlink_core::traits::DisplayBackend;
use leadlink_drivers::lcd::Hd44780;

use crate::board::{DigitalIn, EcgChannel, HostLink};

mod board;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Leadlink firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = MonitorConfig::default();
    info!("Peripherals initialized, {}", config);

    // Host link
    let link_config = leadlink_hal::UartConfig::HOST_LINK;
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = link_config.baudrate;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let link = HostLink::new(rx, tx);

    info!("UART initialized for host link: {}", link_config);

    // Leads-off comparators drive the pins, no pull needed
    let lo_plus = Input::new(p.PIN_10, Pull::None);
    let lo_minus = Input::new(p.PIN_11, Pull::None);
    let leads = LeadFaultDetector::new(DigitalIn(lo_plus), DigitalIn(lo_minus));

    // ECG signal
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let ecg = Channel::new_pin(p.PIN_26, Pull::None);
    let analog = EcgChannel::new(adc, ecg);

    info!("Lead inputs and ADC initialized");

    // LCD
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let mut lcd = Hd44780::new(i2c, Delay);
    if let Err(e) = lcd.init() {
        // Keep going: telemetry still works without the display
        warn!("LCD init failed: {:?}", e);
    } else {
        let (cols, rows) = lcd.dimensions();
        info!("LCD initialized, {}x{}", cols, rows);
    }

    let mut monitor = Monitor::new(link, leads, analog, Presenter::new(lcd), config);

    if let Err(e) = monitor.boot() {
        warn!("Initial render failed: {:?}", e);
    }

    info!("Monitor running, {} ms cycle", config.cycle_period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(config.cycle_period_ms as u64));

    loop {
        let report = monitor.cycle_with_clock(|| Instant::now().as_millis() as u32);
        log_report(&report);

        ticker.next().await;
    }
}

fn log_report(report: &CycleReport) {
    if let Some(state) = report.connection {
        debug!("Host link: {:?}", state);
    }

    if let Some(placement) = report.lead_placement {
        debug!("Lead placement: {:?}", placement);
    }

    for fault in &report.faults {
        match fault {
            CycleFault::SerialRead => warn!("Host link read failed"),
            CycleFault::SerialWrite => warn!("Telemetry write failed"),
            CycleFault::Analog => warn!("ADC read failed"),
            CycleFault::Display(e) => warn!("Display write failed: {:?}", e),
        }
    }

    if let Some(telemetry) = report.telemetry {
        trace!("TX {}", telemetry);
    }
}
