//! # Snapsheet
//!
//! Positioning and animation engine for a draggable panel that snaps between
//! a set of vertical offsets over its container.
//!
//! The host feeds measurements, keyboard and gesture state in through the
//! setters on [`Sheet`]; the engine normalizes snap points, decides where the
//! sheet should be, and animates it there. Positions are offsets from the top
//! of the container: `0` is fully extended and [`Sheet::closed_position`] is
//! off-screen.
//!
//! ```rust
//! use snapsheet::prelude::*;
//!
//! let clock = TestClock::new();
//! let config = SheetConfig::new([
//!     "50%".parse::<SnapPoint>().unwrap(),
//!     "90%".parse::<SnapPoint>().unwrap(),
//! ])
//!     .without_handle()
//!     .animation(AnimationSpec::tween(Duration::from_millis(200), Easing::Linear));
//! let mut sheet = Sheet::with_clock(config, clock.clone());
//! let events = sheet.events();
//!
//! sheet.set_container_height(800.0);
//! while sheet.frame() {
//!     clock.advance(Duration::from_millis(16));
//! }
//! assert_eq!(sheet.position(), 400.0);
//! assert_eq!(sheet.current_index(), 0);
//!
//! sheet.snap_to_index(1, None).unwrap();
//! while sheet.frame() {
//!     clock.advance(Duration::from_millis(16));
//! }
//! assert_eq!(sheet.position(), 80.0);
//! assert_eq!(sheet.sheet_state(), SheetState::Extended);
//! assert_eq!(events.drain().len(), 4);
//! ```
//!
//! Host callbacks (`Change`, `Animate`, `Close`) are queued and delivered
//! through [`EventReceiver::dispatch`], never called inline.

pub mod config;
mod controls;
pub mod derived;
pub mod error;
pub mod events;
mod gesture;
mod orchestrator;
pub mod resolver;
pub mod sheet;
pub mod snap_points;
pub mod state;
pub mod types;
mod watchers;

pub use config::{KeyboardAnimation, SheetConfig, SnapPoint, default_animation};
pub use error::{Result, SheetError};
pub use events::{EventReceiver, SheetEvent, SheetHandler};
pub use sheet::{ObserverId, Sheet, SheetSnapshot};
pub use snap_points::{INITIAL_SNAP_POINT, SnapPoints};
pub use state::SheetCore;
pub use types::*;

pub mod prelude {
    pub use crate::config::{SheetConfig, SnapPoint};
    pub use crate::events::{EventReceiver, SheetEvent, SheetHandler};
    pub use crate::sheet::{Sheet, SheetSnapshot};
    pub use crate::types::*;
    pub use snapsheet_core::{
        AnimationSpec, Duration, Easing, Insets, SpringConfig, SystemClock, TestClock,
    };
}
