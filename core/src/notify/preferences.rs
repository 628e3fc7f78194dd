use hashbrown::HashSet;

use crate::actor::{ActorId, Visibility};

/// Actors who flipped the server's default counter visibility.
///
/// Membership is tied to the connection: the tracker forgets an actor
/// here when they disconnect.
#[derive(Debug, Default)]
pub struct NotificationPreferences {
    hidden_by_default: bool,
    toggled: HashSet<ActorId>,
}

impl NotificationPreferences {
    pub fn new(hidden_by_default: bool) -> Self {
        Self {
            hidden_by_default,
            toggled: HashSet::new(),
        }
    }

    pub fn visibility(&self, id: ActorId) -> Visibility {
        Visibility::resolve(self.hidden_by_default, self.toggled.contains(&id))
    }

    /// Flip the actor's membership and return their new effective visibility.
    pub fn toggle(&mut self, id: ActorId) -> Visibility {
        if !self.toggled.remove(&id) {
            self.toggled.insert(id);
        }
        self.visibility(id)
    }

    pub fn forget(&mut self, id: ActorId) -> bool {
        self.toggled.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.toggled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggled.is_empty()
    }

    pub fn clear(&mut self) {
        self.toggled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_restores() {
        let mut prefs = NotificationPreferences::new(false);
        let id = ActorId(9);

        assert_eq!(prefs.visibility(id), Visibility::Visible);
        assert_eq!(prefs.toggle(id), Visibility::Hidden);
        assert_eq!(prefs.toggle(id), Visibility::Visible);
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_hidden_by_default_inverts() {
        let mut prefs = NotificationPreferences::new(true);
        let id = ActorId(9);

        assert_eq!(prefs.visibility(id), Visibility::Hidden);
        assert_eq!(prefs.toggle(id), Visibility::Visible);
        assert_eq!(prefs.visibility(ActorId(10)), Visibility::Hidden);
    }

    #[test]
    fn test_forget_restores_default() {
        let mut prefs = NotificationPreferences::new(false);
        prefs.toggle(ActorId(1));

        assert!(prefs.forget(ActorId(1)));
        assert!(!prefs.forget(ActorId(1)));
        assert_eq!(prefs.visibility(ActorId(1)), Visibility::Visible);
    }
}
