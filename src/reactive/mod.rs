//! Reactive state: signals, effects, batching.
//!
//! Picker columns publish their selected value through a signal; composites
//! observe those signals with an effect and compare, so a column never calls
//! back into its owner.
//!
//! - [`create_signal`]: create a read/write signal pair.
//! - [`create_effect_with_id`]: auto-tracking side effect, disposable by id.
//! - [`batch`]: coalesce multiple writes into one notification pass.

pub mod effect;
pub mod signal;

pub use effect::{batch, create_effect, create_effect_with_id, dispose_effect, effect_count, EffectId};
pub use signal::{create_signal, dispose_signal, signal_count, ReadSignal, SignalId, WriteSignal};
