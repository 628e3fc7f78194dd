//! Participant identity and the small value types that travel with it.

use std::fmt;

/// Stable identity of a participant (a 64-bit platform account handle).
///
/// `ActorId::NIL` is the host's placeholder for "no one" and is never tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

impl ActorId {
    pub const NIL: ActorId = ActorId(0);

    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Convert a possibly-absent host identity into a trackable one.
    pub fn valid(id: Option<ActorId>) -> Option<ActorId> {
        id.filter(|id| !id.is_nil())
    }
}

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who requested damage against a creature.
///
/// Only players are credited; the host also reports turrets, other
/// creatures and world hazards through the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instigator {
    Player(ActorId),
    Creature,
    Environment,
    Unknown,
}

impl Instigator {
    pub fn player(self) -> Option<ActorId> {
        match self {
            Self::Player(id) => ActorId::valid(Some(id)),
            _ => None,
        }
    }
}

/// Body region hit by player damage. Informational only: the host has
/// already folded it into the armor multiplier it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limb {
    LeftFoot,
    LeftLeg,
    RightFoot,
    RightLeg,
    LeftHand,
    LeftArm,
    RightHand,
    RightArm,
    LeftBack,
    RightBack,
    LeftFront,
    RightFront,
    #[default]
    Spine,
    Skull,
}

/// Whether an actor's counter text is pushed to their client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Resolve effective visibility from the server default and whether the
    /// actor has toggled away from it.
    pub fn resolve(hidden_by_default: bool, toggled: bool) -> Self {
        let default = if hidden_by_default {
            Self::Hidden
        } else {
            Self::Visible
        };
        if toggled { default.flipped() } else { default }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    /// Chat reply for the toggle command.
    pub fn toggle_message(self) -> &'static str {
        match self {
            Self::Visible => "Damage display enabled.",
            Self::Hidden => "Damage display disabled.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_is_not_valid() {
        assert_eq!(ActorId::valid(None), None);
        assert_eq!(ActorId::valid(Some(ActorId::NIL)), None);
        assert_eq!(ActorId::valid(Some(ActorId(7))), Some(ActorId(7)));
    }

    #[test]
    fn test_only_player_instigators_are_credited() {
        assert_eq!(Instigator::Player(ActorId(3)).player(), Some(ActorId(3)));
        assert_eq!(Instigator::Player(ActorId::NIL).player(), None);
        assert_eq!(Instigator::Creature.player(), None);
        assert_eq!(Instigator::Environment.player(), None);
    }

    #[test]
    fn test_visibility_resolution_table() {
        assert_eq!(Visibility::resolve(false, false), Visibility::Visible);
        assert_eq!(Visibility::resolve(false, true), Visibility::Hidden);
        assert_eq!(Visibility::resolve(true, false), Visibility::Hidden);
        assert_eq!(Visibility::resolve(true, true), Visibility::Visible);
    }
}
