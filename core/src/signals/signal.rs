use crate::actor::{ActorId, Instigator, Limb};

/// Events the host game server delivers to the tracker.
///
/// Identities are `Option` because the host can report a missing
/// instigator (offline sentry owner, environmental damage).
#[derive(Debug, Clone, PartialEq)]
pub enum DamageSignal {
    /// A player is about to take damage from another participant.
    PlayerDamaged {
        recipient: Option<ActorId>,
        instigator: Option<ActorId>,
        limb: Limb,
        damage: f32,
        /// Defense multiplier the host resolved for `recipient` at `limb`.
        armor_multiplier: f32,
        allow: bool,
    },

    /// A barricade or structure is about to take damage.
    StructureDamageRequested {
        instigator: Option<ActorId>,
        pending_damage: u16,
        allow: bool,
    },

    /// A creature is about to take damage.
    CreatureDamageRequested {
        instigator: Instigator,
        damage: f32,
        allow: bool,
    },

    ParticipantDisconnected {
        actor: Option<ActorId>,
    },
}

impl DamageSignal {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerDamaged { .. } => "player_damaged",
            Self::StructureDamageRequested { .. } => "structure_damage",
            Self::CreatureDamageRequested { .. } => "creature_damage",
            Self::ParticipantDisconnected { .. } => "disconnected",
        }
    }
}
