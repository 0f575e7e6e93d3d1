#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use dualshock_rp2040::{
    button_changes, sticks_moved, AckValidator, AttentionBus, ButtonState, DualShock,
    HandshakePolicy, SpiConfig, HANDSHAKE_STEP_DELAY_US, POLL_PERIOD_MS,
};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Ticker, Timer};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

type Pad = DualShock<AttentionBus<'static, Spi<'static, SPI0, Blocking>>, AckValidator, Delay>;

/// Signal for passing controller state from the poll task to the report task.
/// Using Signal instead of Channel provides "latest value wins" semantics.
static STATE_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, ButtonState>> = StaticCell::new();

/// Stick movement below this is treated as noise.
const STICK_DEADBAND: u8 = 4;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DualShock reader starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = STATE_SIGNAL.init(Signal::new());

    // --- SPI Setup (mode 3: idle high, sample on second edge) ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SpiConfig::DUALSHOCK.frequency_hz;
    spi_config.polarity = spi::Polarity::IdleHigh;
    spi_config.phase = spi::Phase::CaptureOnSecondTransition;

    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        spi_config,
    );
    let attention = Output::new(p.PIN_17, Level::High);
    let transport = AttentionBus::new(spi, attention, SpiConfig::DUALSHOCK);

    let pad = DualShock::with_policy(
        transport,
        AckValidator,
        Delay,
        HandshakePolicy::with_step_delay_us(HANDSHAKE_STEP_DELAY_US),
    );

    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(poll_task(pad, signal, led).unwrap());
    spawner.spawn(report_task(signal).unwrap());

    info!("DualShock reader initialized");
}

/// Bring the controller up: probe until it answers, then set the reporting mode.
async fn bring_up(pad: &mut Pad) {
    while !pad.connect() {
        Timer::after(Duration::from_secs(1)).await;
    }

    #[cfg(feature = "analog-mode")]
    if let Err(e) = pad.try_enable_analog_mode() {
        warn!("Staying in digital mode: {:?}", e);
    }
}

/// Poll task - polls the controller every tick and signals the latest state.
#[embassy_executor::task]
async fn poll_task(
    mut pad: Pad,
    signal: &'static Signal<CriticalSectionRawMutex, ButtonState>,
    mut led: Output<'static>,
) {
    bring_up(&mut pad).await;

    let mut ticker = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));
    let mut rumble_large = 0u8;
    let mut misses = 0u32;

    loop {
        let state = pad.poll_with_rumble(0, rumble_large);

        if state.digital_valid {
            misses = 0;
            signal.signal(state);

            #[cfg(feature = "rumble-demo")]
            {
                rumble_large = if state.cross { state.cross_pressure } else { 0 };
            }
        } else {
            led.toggle();
            rumble_large = 0;
            misses += 1;

            // About a second without an answer: the controller was unplugged
            if misses == 60 {
                warn!("Controller lost, reconnecting...");
                signal.signal(ButtonState::neutral());
                pad.disconnect();
                bring_up(&mut pad).await;
                misses = 0;
            }
        }

        ticker.next().await;
    }
}

/// Report task - waits for state signals and logs what changed.
#[embassy_executor::task]
async fn report_task(signal: &'static Signal<CriticalSectionRawMutex, ButtonState>) {
    let mut prev = ButtonState::neutral();

    loop {
        let state = signal.wait().await;

        for change in button_changes(&prev, &state) {
            if change.pressed {
                info!("{:?} pressed", change.button);
            } else {
                info!("{:?} released", change.button);
            }
        }

        if state.analog_valid && sticks_moved(&prev, &state, STICK_DEADBAND) {
            info!(
                "L({}, {}) R({}, {})",
                state.analog_left_x, state.analog_left_y, state.analog_right_x, state.analog_right_y
            );
        }

        prev = state;
    }
}
