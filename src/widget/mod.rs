//! Widget system: traits, composite lifecycle, scroll surface, snap timer.

pub mod lifecycle;
pub mod scroll;
pub mod snap;
pub mod traits;

pub use lifecycle::{Lifecycle, LifecycleEvent, PhaseHandle, SyncPhase};
pub use scroll::ScrollState;
pub use snap::{Snap, SnapTimer};
pub use traits::{Interactive, Widget};
