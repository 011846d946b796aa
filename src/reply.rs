pub mod catalog;
pub mod names;

use std::{collections::VecDeque, fmt, sync::Arc};

use irc_proto::Response;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::{
    config::Config, identity::Identifier, reply::names::NameChunks, room::Room, MAX_LINE_BYTES,
};

/// Destination for rendered lines, in the order they should hit the wire.
pub trait ReplySink {
    fn write_line(&mut self, line: String);
}

impl ReplySink for Vec<String> {
    fn write_line(&mut self, line: String) {
        self.push(line);
    }
}

impl ReplySink for VecDeque<String> {
    fn write_line(&mut self, line: String) {
        self.push_back(line);
    }
}

impl ReplySink for UnboundedSender<String> {
    fn write_line(&mut self, line: String) {
        if self.send(line).is_err() {
            debug!("Dropping line for disconnected client");
        }
    }
}

/// A single unit of output from the server, rendered separately for every recipient
/// it is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Numeric(NumericReply),
    Text(TextReply),
    Names(NamesReply),
}

impl Reply {
    /// Id of the entity this reply is sent on behalf of.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Numeric(v) => &v.source,
            Self::Text(v) => &v.source,
            Self::Names(v) => &v.server_id,
        }
    }

    /// Renders the reply for `recipient`, writing each line to `sink` in order.
    pub fn format<S: ReplySink + ?Sized>(
        &self,
        recipient: &impl Identifier,
        max_line_bytes: usize,
        sink: &mut S,
    ) {
        match self {
            Self::Numeric(v) => sink.write_line(v.render_for(recipient.nick())),
            Self::Text(v) => sink.write_line(v.render()),
            Self::Names(v) => v.format(recipient.nick(), max_line_bytes, sink),
        }
    }
}

impl From<NumericReply> for Reply {
    fn from(value: NumericReply) -> Self {
        Self::Numeric(value)
    }
}

impl From<TextReply> for Reply {
    fn from(value: TextReply) -> Self {
        Self::Text(value)
    }
}

impl From<NamesReply> for Reply {
    fn from(value: NamesReply) -> Self {
        Self::Names(value)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(
                f,
                "Reply(source={}, code={:03}, message={})",
                v.source, v.code, v.message
            ),
            Self::Text(v) => write!(f, "Reply(source={}, line={})", v.source, v.line),
            Self::Names(v) => write!(
                f,
                "Reply(source={}, room={}, members={})",
                v.server_id,
                v.room_name,
                v.members.len()
            ),
        }
    }
}

/// A reply identified by a three digit status code, addressed to the recipient's nick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericReply {
    source: String,
    code: u16,
    message: String,
}

impl NumericReply {
    #[must_use]
    pub fn new(source: &impl Identifier, code: u16, message: impl Into<String>) -> Self {
        Self::from_source_id(source.id(), code, message)
    }

    #[must_use]
    pub fn response(
        source: &impl Identifier,
        response: Response,
        message: impl Into<String>,
    ) -> Self {
        Self::new(source, response as u16, message)
    }

    fn from_source_id(source: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    #[must_use]
    pub fn render_for(&self, nick: &str) -> String {
        format!(":{} {:03} {} {}", self.source, self.code, nick, self.message)
    }
}

/// A reply whose line already carries all of its addressing, ie. `PRIVMSG #abc :hi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReply {
    source: String,
    line: String,
}

impl TextReply {
    #[must_use]
    pub fn new(source: &impl Identifier, line: impl Into<String>) -> Self {
        Self {
            source: source.id().to_string(),
            line: line.into(),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!(":{} {}", self.source, self.line)
    }
}

/// The list of users in a room, split across as many lines as it takes.
///
/// The member list is captured when the reply is built, later changes to the room
/// aren't reflected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesReply {
    server_id: String,
    room_id: String,
    room_name: String,
    members: Vec<String>,
}

impl NamesReply {
    #[must_use]
    pub fn new(room: &Room) -> Self {
        Self {
            server_id: room.server_id.clone(),
            room_id: room.id().to_string(),
            room_name: room.name.clone(),
            members: room.nicks().to_vec(),
        }
    }

    /// A single `RPL_NAMREPLY` line containing `names`.
    #[must_use]
    pub fn group(&self, names: &[String]) -> NumericReply {
        NumericReply::from_source_id(
            self.server_id.as_str(),
            Response::RPL_NAMREPLY as u16,
            format!("= {} :{}", self.room_name, names.join(" ")),
        )
    }

    /// The `RPL_ENDOFNAMES` line terminating the list.
    #[must_use]
    pub fn end(&self) -> NumericReply {
        NumericReply::from_source_id(
            self.room_id.as_str(),
            Response::RPL_ENDOFNAMES as u16,
            ":End of NAMES list",
        )
    }

    /// Length of a names line for `nick` with no names in it. Depends on the
    /// recipient, so has to be worked out every time the reply is rendered.
    #[must_use]
    pub fn prefix_len(&self, nick: &str) -> usize {
        self.group(&[]).render_for(nick).len()
    }

    fn format<S: ReplySink + ?Sized>(&self, nick: &str, max_line_bytes: usize, sink: &mut S) {
        let chunks = NameChunks::new(&self.members, self.prefix_len(nick), max_line_bytes);

        if chunks.budget().is_none() && !self.members.is_empty() {
            warn!(
                room = %self.room_name,
                nick, "Names prefix alone exceeds the line ceiling, omitting members"
            );
        }

        for names in chunks {
            sink.write_line(self.group(names).render_for(nick));
        }

        sink.write_line(self.end().render_for(nick));
    }
}

/// Renders replies for individual recipients using the server's configured limits.
#[derive(Debug, Clone)]
pub struct ReplyEncoder {
    config: Arc<Config>,
}

impl ReplyEncoder {
    #[must_use]
    pub const fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configured line ceiling, never above what fits in a single frame.
    #[must_use]
    pub fn max_line_bytes(&self) -> usize {
        self.config.max_line_bytes.min(MAX_LINE_BYTES)
    }

    /// Renders `reply` for `recipient` and appends the resulting lines to `sink`.
    pub fn format<S: ReplySink + ?Sized>(
        &self,
        reply: &Reply,
        recipient: &impl Identifier,
        sink: &mut S,
    ) {
        reply.format(recipient, self.max_line_bytes(), sink);
    }

    #[must_use]
    pub fn render(&self, reply: &Reply, recipient: &impl Identifier) -> Vec<String> {
        let mut lines = Vec::new();
        self.format(reply, recipient, &mut lines);
        lines
    }
}
