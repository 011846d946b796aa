/// Anything that can appear as the source or recipient of a reply.
pub trait Identifier {
    /// Full identifier used in the prefix of lines sent on behalf of this entity,
    /// ie. `nick!user@host` for clients.
    fn id(&self) -> &str;

    /// Identifier safe to show to other users.
    fn public_id(&self) -> &str;

    /// Display name, used as the target field of numeric replies.
    fn nick(&self) -> &str;
}

/// A plain identity triple, for when there's no richer entity to hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub public_id: String,
    pub nick: String,
}

impl Identity {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        public_id: impl Into<String>,
        nick: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            public_id: public_id.into(),
            nick: nick.into(),
        }
    }

    /// Builds an identity where all three projections are the same name, as is the
    /// case for servers and rooms.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::new(name, name, name)
    }
}

impl Identifier for Identity {
    fn id(&self) -> &str {
        &self.id
    }

    fn public_id(&self) -> &str {
        &self.public_id
    }

    fn nick(&self) -> &str {
        &self.nick
    }
}

impl<T: Identifier + ?Sized> Identifier for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn public_id(&self) -> &str {
        (**self).public_id()
    }

    fn nick(&self) -> &str {
        (**self).nick()
    }
}

#[cfg(test)]
mod test {
    use crate::identity::{Identifier, Identity};

    #[test]
    fn named_uses_name_for_every_projection() {
        let identity = Identity::named("#rust");
        assert_eq!(identity.id(), "#rust");
        assert_eq!(identity.public_id(), "#rust");
        assert_eq!(identity.nick(), "#rust");
    }

    #[test]
    fn borrowed_identifier_forwards() {
        let identity = Identity::new("a!b@c", "a!b@hidden", "a");
        let borrowed: &Identity = &identity;
        assert_eq!(Identifier::id(&borrowed), "a!b@c");
        assert_eq!(Identifier::public_id(&borrowed), "a!b@hidden");
        assert_eq!(Identifier::nick(&borrowed), "a");
    }
}
