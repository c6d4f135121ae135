//! Auto-tracking side effects.
//!
//! An effect is a closure that re-runs whenever any signal it read during its
//! last run is written:
//!
//! ```
//! use shift_picker::reactive::{create_effect_with_id, create_signal, dispose_effect};
//!
//! let (count, set_count) = create_signal(0);
//! let id = create_effect_with_id(move || {
//!     let _ = count.get();
//! });
//! set_count.set(1);
//! dispose_effect(id);
//! ```
//!
//! Use [`batch`] to group writes so dependent effects run once, after the
//! group, against a consistent state.

pub use super::signal::{
    batch, create_effect, create_effect_with_id, dispose_effect, effect_count, EffectId,
};
