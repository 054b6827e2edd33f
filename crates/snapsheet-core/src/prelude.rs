pub use crate::animation::{
    AnimationSpec, Clock, Easing, Progress, SpringConfig, SystemClock, TestClock, Transition,
};
pub use crate::geometry::Insets;
pub use crate::mailbox::{Inbox, Outbox, mailbox};
pub use crate::reactive::{Graph, ReactionId, Tracked};
pub use crate::signal::Signal;
pub use web_time::{Duration, Instant};
