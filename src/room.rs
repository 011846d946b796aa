use crate::identity::Identifier;

/// A room (ie. #abc) and the nicks of the users currently in it, in join order.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    /// Id of the server hosting the room, used as the source of numeric replies about it.
    pub server_id: String,
    pub topic: Option<String>,
    members: Vec<String>,
}

impl Room {
    #[must_use]
    pub fn new(name: impl Into<String>, server: &impl Identifier) -> Self {
        Self {
            name: name.into(),
            server_id: server.id().to_string(),
            topic: None,
            members: Vec::new(),
        }
    }

    /// Adds a member to the end of the list, returns `false` if they were already present.
    pub fn join(&mut self, nick: impl Into<String>) -> bool {
        let nick = nick.into();

        if self.contains(&nick) {
            return false;
        }

        self.members.push(nick);
        true
    }

    /// Removes a member, returns `false` if they weren't in the room.
    pub fn part(&mut self, nick: &str) -> bool {
        let Some(idx) = self.members.iter().position(|v| v == nick) else {
            return false;
        };

        self.members.remove(idx);
        true
    }

    #[must_use]
    pub fn contains(&self, nick: &str) -> bool {
        self.members.iter().any(|v| v == nick)
    }

    #[must_use]
    pub fn nicks(&self) -> &[String] {
        &self.members
    }
}

impl Identifier for Room {
    fn id(&self) -> &str {
        &self.name
    }

    fn public_id(&self) -> &str {
        &self.name
    }

    fn nick(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod test {
    use crate::{identity::Identity, room::Room};

    fn room() -> Room {
        Room::new("#test", &Identity::named("my.cool.server"))
    }

    #[test]
    fn join_keeps_order_and_rejects_duplicates() {
        let mut room = room();
        assert!(room.join("bob"));
        assert!(room.join("alice"));
        assert!(!room.join("bob"));
        assert_eq!(room.nicks(), ["bob", "alice"]);
    }

    #[test]
    fn part_removes_only_named_member() {
        let mut room = room();
        room.join("bob");
        room.join("alice");
        room.join("carol");

        assert!(room.part("alice"));
        assert!(!room.part("alice"));
        assert_eq!(room.nicks(), ["bob", "carol"]);
    }
}
