//! Desk clock firmware for nRF52840.
//!
//! # Architecture
//!
//! - Scan task: samples the three keys and the QDEC counter every
//!   `SCAN_INTERVAL_MS` and pushes debounced events into `EVENTS`.
//! - QDEC task: accumulates hardware quadrature steps into a free-running
//!   16-bit counter.
//! - Main task: owns the I²C devices and the display and runs
//!   `App::tick` every `MAIN_LOOP_INTERVAL_MS`.
//!
//! Scan and QDEC run on an interrupt executor (`EGU1_SWI1`, priority 6)
//! so they preempt the main loop during blocking I²C transfers.
//!
//! Build: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

mod drivers;

use core::cell::RefCell;
use core::sync::atomic::{AtomicU16, Ordering};

use defmt::{info, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::peripherals::{QDEC, TWISPI0};
use embassy_nrf::qdec::{self, Qdec};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::bind_interrupts;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use deskclock::config::{APP_NAME, APP_VERSION, MAIN_LOOP_INTERVAL_MS, SCAN_INTERVAL_MS};
use deskclock::devices::QuadratureCounter;
use deskclock::input::{EventQueue, InputScanner, RawInputs};
use deskclock::settings::EepromSettingsStore;
use deskclock::App;

use crate::drivers::{Aht20, At24c32, Ds3231, Oled};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<TWISPI0>;
    QDEC => qdec::InterruptHandler<QDEC>;
});

/// Input events from the scan task to the main loop.
static EVENTS: EventQueue = EventQueue::new();

/// Free-running encoder position, written by the QDEC task.
static ENCODER_COUNT: AtomicU16 = AtomicU16::new(0);

/// Runs the input tasks above the thread-mode main loop.
static EXECUTOR_INPUT: InterruptExecutor = InterruptExecutor::new();

static I2C_BUS: StaticCell<RefCell<Twim<'static, TWISPI0>>> = StaticCell::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_INPUT.on_interrupt()
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// The QDEC counter as seen by the input scanner.
struct SharedCounter(&'static AtomicU16);

impl QuadratureCounter for SharedCounter {
    fn count(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    fn set_count(&mut self, value: u16) {
        self.0.store(value, Ordering::Relaxed);
    }
}

struct Keys {
    back: Input<'static>,
    confirm: Input<'static>,
    encoder: Input<'static>,
}

impl Keys {
    /// Keys are active-low with internal pull-ups.
    fn pressed(&self) -> [bool; 3] {
        [self.back.is_low(), self.confirm.is_low(), self.encoder.is_low()]
    }
}

#[embassy_executor::task]
async fn scan_task(keys: Keys) {
    info!("Input scan task started");

    let mut counter = SharedCounter(&ENCODER_COUNT);
    let mut scanner = InputScanner::new();
    scanner.reset(&mut counter);

    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));
    loop {
        ticker.next().await;
        let raw = RawInputs {
            buttons: keys.pressed(),
            encoder_count: counter.count(),
        };
        scanner.scan(raw, now_ms(), &EVENTS);
    }
}

#[embassy_executor::task]
async fn qdec_task(mut qdec: Qdec<'static, QDEC>) {
    info!("QDEC task started");
    loop {
        let steps = qdec.read().await;
        ENCODER_COUNT.fetch_add(steps as u16, Ordering::Relaxed);
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("{} v{} starting", APP_NAME, APP_VERSION);

    let p = embassy_nrf::init(Default::default());

    // Pin map: see `config.rs`.
    let keys = Keys {
        back: Input::new(p.P0_11, Pull::Up),
        confirm: Input::new(p.P0_12, Pull::Up),
        encoder: Input::new(p.P0_24, Pull::Up),
    };
    let qdec = Qdec::new(p.QDEC, Irqs, p.P0_31, p.P0_30, qdec::Config::default());

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let bus = I2C_BUS.init(RefCell::new(twim));

    let mut display = Oled::new(RefCellDevice::new(bus));
    let clock = Ds3231::new(RefCellDevice::new(bus));
    let store = EepromSettingsStore::new(At24c32::new(RefCellDevice::new(bus), Delay));
    let mut sensor = Aht20::new(RefCellDevice::new(bus), Delay);
    if let Err(e) = sensor.init() {
        warn!("AHT20: init failed ({})", e.as_str());
    }
    info!("Peripherals initialized");

    let mut app = App::new(clock, store, sensor, now_ms());

    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let input_spawner = EXECUTOR_INPUT.start(interrupt::EGU1_SWI1);
    input_spawner.must_spawn(qdec_task(qdec));
    input_spawner.must_spawn(scan_task(keys));

    loop {
        app.tick(now_ms(), &EVENTS, &mut display);
        Timer::after_millis(MAIN_LOOP_INTERVAL_MS).await;
    }
}
