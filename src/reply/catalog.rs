//! Constructors for every reply the server sends that fits on a single line.

use irc_proto::Response;

use crate::{
    client::Client,
    identity::Identifier,
    reply::{NamesReply, NumericReply, Reply, TextReply},
    room::Room,
    server::ServerIdentity,
};

/// `Mon, 02 Jan 2006 15:04:05 UTC`
const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

fn numeric(source: &impl Identifier, response: Response, message: impl Into<String>) -> Reply {
    NumericReply::response(source, response, message).into()
}

/// Numeric replies about a room are sent on behalf of the server hosting it.
fn room_numeric(room: &Room, response: Response, message: impl Into<String>) -> Reply {
    NumericReply::from_source_id(room.server_id.as_str(), response as u16, message).into()
}

fn text(source: &impl Identifier, line: impl Into<String>) -> Reply {
    TextReply::new(source, line).into()
}

// messaging

#[must_use]
pub fn privmsg(source: &impl Identifier, target: &impl Identifier, message: &str) -> Reply {
    text(source, format!("PRIVMSG {} :{message}", target.nick()))
}

#[must_use]
pub fn privmsg_room(room: &Room, source: &impl Identifier, message: &str) -> Reply {
    text(source, format!("PRIVMSG {} :{message}", room.name))
}

#[must_use]
pub fn nick(source: &impl Identifier, new_nick: &str) -> Reply {
    text(source, format!("NICK {new_nick}"))
}

#[must_use]
pub fn join(room: &Room, client: &Client) -> Reply {
    text(client, format!("JOIN {}", room.name))
}

#[must_use]
pub fn part(room: &Room, client: &Client, message: &str) -> Reply {
    text(client, format!("PART {} :{message}", room.name))
}

#[must_use]
pub fn pong(server: &ServerIdentity) -> Reply {
    text(server, format!("PONG {}", server.id()))
}

#[must_use]
pub fn quit(client: &Client, message: &str) -> Reply {
    text(client, format!("QUIT :{message}"))
}

#[must_use]
pub fn invite(room: &Room, inviter: &Client) -> Reply {
    text(inviter, format!("INVITE {}", room.name))
}

// numeric replies

#[must_use]
pub fn welcome(source: &impl Identifier, client: &Client) -> Reply {
    numeric(
        source,
        Response::RPL_WELCOME,
        format!("Welcome to the Internet Relay Network {}", client.id()),
    )
}

#[must_use]
pub fn your_host(server: &ServerIdentity) -> Reply {
    numeric(
        server,
        Response::RPL_YOURHOST,
        format!(
            "Your host is {}, running version {}",
            server.name, server.version
        ),
    )
}

#[must_use]
pub fn created(server: &ServerIdentity) -> Reply {
    numeric(
        server,
        Response::RPL_CREATED,
        format!("This server was created {}", server.created.format(RFC1123)),
    )
}

#[must_use]
pub fn my_info(server: &ServerIdentity) -> Reply {
    numeric(
        server,
        Response::RPL_MYINFO,
        format!("{} {} a kn", server.name, server.version),
    )
}

#[must_use]
pub fn umode_is(server: &ServerIdentity, client: &Client) -> Reply {
    numeric(server, Response::RPL_UMODEIS, client.mode.as_str())
}

#[must_use]
pub fn no_topic(room: &Room) -> Reply {
    room_numeric(
        room,
        Response::RPL_NOTOPIC,
        format!("{} :No topic is set", room.name),
    )
}

/// Sends the room's topic, or `RPL_NOTOPIC` if one hasn't been set.
#[must_use]
pub fn topic(room: &Room) -> Reply {
    let Some(topic) = &room.topic else {
        return no_topic(room);
    };

    room_numeric(room, Response::RPL_TOPIC, format!("{} :{topic}", room.name))
}

#[must_use]
pub fn inviting(room: &Room, invitee: &impl Identifier) -> Reply {
    room_numeric(
        room,
        Response::RPL_INVITING,
        format!("{} {}", room.name, invitee.nick()),
    )
}

#[must_use]
pub fn names(room: &Room) -> Reply {
    NamesReply::new(room).into()
}

#[must_use]
pub fn end_of_names(source: &impl Identifier) -> Reply {
    numeric(source, Response::RPL_ENDOFNAMES, ":End of NAMES list")
}

#[must_use]
pub fn youre_oper(server: &ServerIdentity) -> Reply {
    numeric(server, Response::RPL_YOUREOPER, ":You are now an IRC operator")
}

// errors

#[must_use]
pub fn already_registered(source: &impl Identifier) -> Reply {
    numeric(source, Response::ERR_ALREADYREGISTRED, ":You may not reregister")
}

#[must_use]
pub fn nickname_in_use(source: &impl Identifier, nick: &str) -> Reply {
    numeric(
        source,
        Response::ERR_NICKNAMEINUSE,
        format!("{nick} :Nickname is already in use"),
    )
}

#[must_use]
pub fn unknown_command(source: &impl Identifier, command: &str) -> Reply {
    numeric(
        source,
        Response::ERR_UNKNOWNCOMMAND,
        format!("{command} :Unknown command"),
    )
}

#[must_use]
pub fn users_dont_match(source: &impl Identifier) -> Reply {
    numeric(
        source,
        Response::ERR_USERSDONTMATCH,
        ":Cannot change mode for other users",
    )
}

#[must_use]
pub fn need_more_params(source: &impl Identifier, command: &str) -> Reply {
    numeric(
        source,
        Response::ERR_NEEDMOREPARAMS,
        format!("{command} :Not enough parameters"),
    )
}

#[must_use]
pub fn no_such_channel(source: &impl Identifier, channel: &str) -> Reply {
    numeric(
        source,
        Response::ERR_NOSUCHCHANNEL,
        format!("{channel} :No such channel"),
    )
}

#[must_use]
pub fn user_on_channel(room: &Room, member: &impl Identifier) -> Reply {
    room_numeric(
        room,
        Response::ERR_USERONCHANNEL,
        format!("{} {} :is already on channel", member.nick(), room.name),
    )
}

#[must_use]
pub fn not_on_channel(room: &Room) -> Reply {
    room_numeric(
        room,
        Response::ERR_NOTONCHANNEL,
        format!("{} :You're not on that channel", room.name),
    )
}

#[must_use]
pub fn invite_only_channel(room: &Room) -> Reply {
    room_numeric(
        room,
        Response::ERR_INVITEONLYCHAN,
        format!("{} :Cannot join channel (+i)", room.name),
    )
}

#[must_use]
pub fn bad_channel_key(room: &Room) -> Reply {
    room_numeric(
        room,
        Response::ERR_BADCHANNELKEY,
        format!("{} :Cannot join channel (+k)", room.name),
    )
}

#[must_use]
pub fn no_such_nick(source: &impl Identifier, nick: &str) -> Reply {
    numeric(
        source,
        Response::ERR_NOSUCHNICK,
        format!("{nick} :No such nick/channel"),
    )
}

#[must_use]
pub fn passwd_mismatch(server: &ServerIdentity) -> Reply {
    numeric(server, Response::ERR_PASSWDMISMATCH, ":Password incorrect")
}

#[must_use]
pub fn no_chan_modes(room: &Room) -> Reply {
    room_numeric(
        room,
        Response::ERR_NOCHANMODES,
        format!("{} :Channel doesn't support modes", room.name),
    )
}

#[must_use]
pub fn no_privileges(server: &ServerIdentity) -> Reply {
    numeric(server, Response::ERR_NOPRIVILEGES, ":Permission Denied")
}

#[must_use]
pub fn restricted(server: &ServerIdentity) -> Reply {
    numeric(
        server,
        Response::ERR_RESTRICTED,
        ":Your connection is restricted!",
    )
}
