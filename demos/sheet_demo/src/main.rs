//! Headless walk through a sheet's life: mount, snap, keyboard, drag, close.
//!
//! Run with `RUST_LOG=snapsheet=debug` to see the engine's decisions. An
//! optional first argument is a path to a JSON `SheetConfig`.

use anyhow::Context;
use snapsheet::prelude::*;

const DEFAULT_CONFIG: &str = r#"{
    "snapPoints": ["25%", "50%", "90%"],
    "index": 1,
    "hasHandle": true,
    "enableDynamicSizing": false,
    "keyboardBehavior": "interactive",
    "keyboardBlurBehavior": "restore",
    "enablePanDownToClose": true
}"#;

const FRAME: Duration = Duration::from_millis(16);

struct Printer;

impl SheetHandler for Printer {
    fn on_change(&mut self, index: i32, position: f32, kind: SnapPointKind) {
        println!("  change -> index {index} at {position:.1} ({kind:?})");
    }

    fn on_animate(&mut self, from_index: i32, to_index: i32) {
        println!("  animate {from_index} -> {to_index}");
    }

    fn on_close(&mut self) {
        println!("  closed");
    }
}

fn load_config() -> anyhow::Result<SheetConfig> {
    let text = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };
    let config: SheetConfig = serde_json::from_str(&text).context("parsing sheet config")?;
    Ok(config.animation(AnimationSpec::tween(
        Duration::from_millis(240),
        Easing::EaseInOut,
    )))
}

fn settle(sheet: &mut Sheet, clock: &TestClock, events: &EventReceiver) {
    let mut frames = 0;
    while sheet.frame() {
        clock.advance(FRAME);
        frames += 1;
    }
    let snapshot = sheet.snapshot();
    println!(
        "  {frames} frames, position {:.1}, index {:.2}, {:?}, scroll {:?}",
        snapshot.position,
        snapshot.fractional_index,
        snapshot.sheet_state,
        snapshot.scrollable_lock_state
    );
    events.dispatch(&mut Printer);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    log::info!("snap points {:?}", config.snap_points);

    let clock = TestClock::new();
    let mut sheet = Sheet::with_clock(config, clock.clone());
    let events = sheet.events();

    println!("measure 844pt container, 24pt handle");
    sheet.set_container_height(844.0);
    sheet.set_handle_height(24.0);
    settle(&mut sheet, &clock, &events);

    println!("expand");
    sheet.expand(None);
    settle(&mut sheet, &clock, &events);

    println!("keyboard shown (336pt)");
    sheet.set_keyboard_animation(KeyboardEasing::EaseOut, Duration::from_millis(250));
    sheet.set_keyboard(KeyboardState::Shown, 336.0);
    settle(&mut sheet, &clock, &events);
    println!("  max content height {:.1}", sheet.max_content_height());

    println!("keyboard hidden");
    sheet.set_keyboard(KeyboardState::Hidden, 0.0);
    settle(&mut sheet, &clock, &events);

    println!("drag down and fling");
    sheet.begin_drag(GestureSource::Handle);
    for y in [120.0, 260.0, 420.0] {
        sheet.drag_to(y);
    }
    sheet.end_drag(900.0);
    settle(&mut sheet, &clock, &events);

    println!("snap_to_index(7)");
    if let Err(err) = sheet.snap_to_index(7, None) {
        println!("  rejected: {err}");
    }

    println!("close");
    sheet.close(None);
    settle(&mut sheet, &clock, &events);

    Ok(())
}
