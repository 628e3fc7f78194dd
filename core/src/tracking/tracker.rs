//! Damage tracking handler
//!
//! Credits damage to the actor who dealt it, keeps a rolling total per
//! actor that clears after a quiet period, and mirrors the total onto the
//! actor's counter element through the host UI layer.
//!
//! Three protocols touch the store:
//! - **Update** (`credit`, via the `on_*_damage*` entry points): create or
//!   refresh an entry, open the channel on creation, push the text
//! - **Sweep** (`sweep`): evict entries past their deadline, close their channel
//! - **Removal** (`remove`, via disconnect): evict silently

use std::time::Instant;

use damage_display_types::formatting::format_total;
use tracing::{debug, trace};

use crate::accumulator::{AccumulatorEntry, AccumulatorStore};
use crate::actor::{ActorId, Instigator, Limb, Visibility};
use crate::clock::{Clock, SystemClock};
use crate::notify::{NotificationPreferences, NotificationSink};
use crate::signals::{DamageSignal, SignalHandler};

use super::TrackerSettings;

/// Raw damage below this is ignored on every channel.
pub const MIN_CREDITED_DAMAGE: f32 = 1.0;

/// Largest single hit the counter element can show after armor adjustment.
pub const MAX_ADJUSTED_HIT: u8 = u8::MAX;

/// Apply the recipient's armor multiplier to a player hit and clamp it into
/// the counter's range.
///
/// Floors, then clamps to `0..=MAX_ADJUSTED_HIT`. NaN becomes 0.
pub fn adjust_player_damage(damage: f32, armor_multiplier: f32) -> u8 {
    let scaled = (damage * armor_multiplier).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, f32::from(MAX_ADJUSTED_HIT)) as u8
}

/// `false` for NaN as well as for small hits.
fn meets_threshold(damage: f32) -> bool {
    damage >= MIN_CREDITED_DAMAGE
}

/// Tracks rolling damage totals and drives the per-actor counter element.
///
/// Every method is synchronous and non-blocking; the host calls them one at
/// a time from its own loop. For multi-threaded hosts wrap the tracker in
/// [`crate::service::TrackingService`].
#[derive(Debug)]
pub struct DamageTracker<S, C = SystemClock> {
    settings: TrackerSettings,
    store: AccumulatorStore,
    preferences: NotificationPreferences,
    sink: S,
    clock: C,
    /// Keys collected during a sweep, reused between sweeps
    expired: Vec<ActorId>,
}

impl<S: NotificationSink> DamageTracker<S, SystemClock> {
    pub fn new(settings: TrackerSettings, sink: S) -> Self {
        Self::with_clock(settings, sink, SystemClock)
    }
}

impl<S: NotificationSink, C: Clock> DamageTracker<S, C> {
    pub fn with_clock(settings: TrackerSettings, sink: S, clock: C) -> Self {
        Self {
            store: AccumulatorStore::with_capacity(settings.capacity_hint),
            preferences: NotificationPreferences::new(settings.hidden_by_default),
            expired: Vec::new(),
            settings,
            sink,
            clock,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot of an actor's current total, if they have one.
    pub fn entry(&self, id: ActorId) -> Option<AccumulatorEntry> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn visibility(&self, id: ActorId) -> Visibility {
        self.preferences.visibility(id)
    }

    /// Number of actors currently overriding the default visibility.
    pub fn preference_count(&self) -> usize {
        self.preferences.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host event entry points
    // ─────────────────────────────────────────────────────────────────────────

    /// Player-vs-participant damage. Applies armor and the display clamp
    /// before crediting `instigator`.
    ///
    /// Returns the adjusted amount that was credited. Never changes what the
    /// host applies to the recipient.
    pub fn on_player_damaged(
        &mut self,
        recipient: Option<ActorId>,
        instigator: Option<ActorId>,
        limb: Limb,
        damage: f32,
        armor_multiplier: f32,
        allow: bool,
    ) -> Option<u8> {
        if recipient.is_none() || !allow || !meets_threshold(damage) {
            trace!(?recipient, damage, allow, "Ignoring player damage");
            return None;
        }
        let Some(instigator) = ActorId::valid(instigator) else {
            trace!(?recipient, "Player damage without an instigator");
            return None;
        };

        let adjusted = adjust_player_damage(damage, armor_multiplier);
        trace!(%instigator, ?limb, damage, armor_multiplier, adjusted, "Adjusted player damage");
        self.credit(instigator, f64::from(adjusted));
        Some(adjusted)
    }

    /// Structure (barricade) damage. Credited as-is, without armor or clamp.
    pub fn on_structure_damage(
        &mut self,
        instigator: Option<ActorId>,
        pending_damage: u16,
        allow: bool,
    ) -> bool {
        if !self.settings.show_secondary_channels
            || !allow
            || !meets_threshold(f32::from(pending_damage))
        {
            return false;
        }
        let Some(instigator) = ActorId::valid(instigator) else {
            return false;
        };
        self.credit(instigator, f64::from(pending_damage)).is_some()
    }

    /// Creature damage. Only player instigators are credited, as-is.
    pub fn on_creature_damage(&mut self, instigator: Instigator, damage: f32, allow: bool) -> bool {
        if !self.settings.show_secondary_channels || !allow || !meets_threshold(damage) {
            return false;
        }
        let Some(player) = instigator.player() else {
            trace!(?instigator, "Creature damage from a non-player");
            return false;
        };
        self.credit(player, f64::from(damage)).is_some()
    }

    /// Removal Protocol for a departing participant.
    pub fn on_participant_disconnected(&mut self, actor: Option<ActorId>) -> bool {
        match ActorId::valid(actor) {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Protocols
    // ─────────────────────────────────────────────────────────────────────────

    /// Update Protocol: add `amount` to the instigator's rolling total.
    ///
    /// Opens the counter channel when the entry is created and pushes the
    /// rounded total when the actor's counter is visible. The total is kept
    /// either way. Returns the stored snapshot, or `None` for `ActorId::NIL`
    /// and for amounts that are negative, NaN or infinite.
    pub fn credit(&mut self, instigator: ActorId, amount: f64) -> Option<AccumulatorEntry> {
        if instigator.is_nil() {
            return None;
        }
        // Totals only grow and must stay finite
        if !amount.is_finite() || amount < 0.0 {
            trace!(%instigator, amount, "Ignoring unusable damage amount");
            return None;
        }

        let expires_at = self.clock.now() + self.settings.decay_window;
        let upsert = self.store.upsert(instigator, |prev| match prev {
            Some(entry) => entry.refreshed(amount, expires_at),
            None => AccumulatorEntry::new(amount, expires_at),
        });
        let entry = upsert.entry();
        let channels = self.settings.channels;

        if upsert.is_created() {
            debug!(%instigator, total = entry.total, "Started damage total");
            self.sink
                .open_channel(channels.channel_id, channels.slot, instigator);
        } else {
            trace!(%instigator, amount, total = entry.total, "Extended damage total");
        }

        if self.preferences.visibility(instigator).is_visible() {
            let text = format_total(entry.total);
            self.sink
                .set_channel_text(channels.slot, instigator, &self.settings.text_element, &text);
        }

        Some(entry)
    }

    /// Sweep Protocol: evict every entry whose deadline has passed and close
    /// its channel. Returns the number of evicted entries.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now();
        let channel_id = self.settings.channels.channel_id;

        let sink = &mut self.sink;
        let expired = &mut self.expired;
        self.store.for_each_expired(now, |id, _| {
            sink.close_channel(channel_id, id);
            expired.push(id);
        });

        let evicted = self.expired.len();
        for id in self.expired.drain(..) {
            self.store.remove(id);
        }

        if evicted > 0 {
            debug!(evicted, remaining = self.store.len(), "Swept expired damage totals");
        }
        evicted
    }

    /// Removal Protocol: drop an actor's entry without touching their UI.
    ///
    /// Also forgets their visibility preference, which lives only as long
    /// as their connection. Returns whether an entry was removed.
    pub fn remove(&mut self, id: ActorId) -> bool {
        let removed = self.store.remove(id);
        self.preferences.forget(id);
        if removed {
            debug!(actor = %id, "Dropped damage total for departed actor");
        }
        removed
    }

    /// Write side of the preference set: flip the actor's counter visibility.
    pub fn toggle_notifications(&mut self, id: ActorId) -> Visibility {
        let visibility = self.preferences.toggle(id);
        debug!(actor = %id, ?visibility, "Toggled damage counter");
        visibility
    }

    /// Drop all entries and preferences (component teardown).
    pub fn clear(&mut self) {
        self.store.clear();
        self.preferences.clear();
        self.expired.clear();
    }
}

impl<S: NotificationSink, C: Clock> SignalHandler for DamageTracker<S, C> {
    fn handle_signal(&mut self, signal: &DamageSignal) {
        trace!(kind = signal.kind(), "Handling signal");
        match signal {
            DamageSignal::PlayerDamaged {
                recipient,
                instigator,
                limb,
                damage,
                armor_multiplier,
                allow,
            } => {
                self.on_player_damaged(
                    *recipient,
                    *instigator,
                    *limb,
                    *damage,
                    *armor_multiplier,
                    *allow,
                );
            }
            DamageSignal::StructureDamageRequested {
                instigator,
                pending_damage,
                allow,
            } => {
                self.on_structure_damage(*instigator, *pending_damage, *allow);
            }
            DamageSignal::CreatureDamageRequested {
                instigator,
                damage,
                allow,
            } => {
                self.on_creature_damage(*instigator, *damage, *allow);
            }
            DamageSignal::ParticipantDisconnected { actor } => {
                self.on_participant_disconnected(*actor);
            }
        }
    }
}
