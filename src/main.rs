//! Headless spin-wheel demo
//!
//! Builds an 8-slot wheel, spins it via the hub, and prints the event
//! stream. Prize data can come from a JSON file (an ordered list of
//! `{title, image, amount}` records) passed as the first argument;
//! the second argument seeds the RNG.
//!
//! ```text
//! spin-wheel [prizes.json] [seed]
//! ```

use std::error::Error;

use spin_wheel::consts::SIM_DT;
use spin_wheel::sim::PegLayout;
use spin_wheel::{
    InputEvent, PrizeSlot, PrizeTable, SpinWheelController, WheelConfig, WheelEvent,
};

fn default_prizes() -> PrizeTable {
    PrizeTable::new(vec![
        PrizeSlot::new("10 coins", "coins_small", 10),
        PrizeSlot::new("a present", "present", 0),
        PrizeSlot::new("25 coins", "coins_small", 25),
        PrizeSlot::new("50 coins", "coins_medium", 50),
        PrizeSlot::new("a present", "present", 0),
        PrizeSlot::new("100 coins", "coins_large", 100),
        PrizeSlot::new("5 coins", "coins_small", 5),
        PrizeSlot::new("200 coins", "coins_large", 200),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let prizes = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str::<PrizeTable>(&json)?
        }
        None => default_prizes(),
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 0x5EED,
    };

    let layout = PegLayout::ring(prizes.len(), 240.0, 90.0);
    let mut wheel = SpinWheelController::new(prizes, &layout, WheelConfig::default(), seed)?;

    println!("spinning (seed {seed})...");
    wheel.handle_input(InputEvent::HubTap);

    let mut ticks = 0u32;
    // 60 seconds of simulated time is far more than any spin needs
    for _ in 0..(60.0 / SIM_DT) as u32 {
        for event in wheel.update(SIM_DT) {
            match event {
                WheelEvent::SpinStarted => println!("whoosh!"),
                WheelEvent::Contact => ticks += 1,
                WheelEvent::InsufficientSpin => println!("spin harder!"),
                WheelEvent::Highlight(index) => {
                    println!("{ticks} peg ticks; wheel stopped on slot {index}");
                }
                WheelEvent::Won {
                    title,
                    amount,
                    ..
                } => {
                    if amount > 0 {
                        println!("you won {title} with a value of {amount}");
                    } else {
                        println!("you won {title}");
                    }
                    wheel.acknowledge_win();
                    return Ok(());
                }
            }
        }
    }

    Err("wheel never settled".into())
}
