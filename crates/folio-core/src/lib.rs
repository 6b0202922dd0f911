pub mod config;
pub mod content;
pub mod error;
pub mod motion;
pub mod nav;
pub mod signal;

pub use config::{AppConfig, EasingType, RevealSettings, ScrollConfig};
pub use content::Portfolio;
pub use error::{Error, Result};
pub use nav::{MountedTracker, NavStyle, ScrollStateTracker, SCROLL_THRESHOLD};
pub use signal::{Signal, Subscription};
