use std::sync::Arc;

use futures::SinkExt;
use tokio::{
    io::AsyncWrite,
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        watch,
    },
    task::JoinHandle,
};
use tokio_util::codec::FramedWrite;
use tracing::{debug, instrument, warn, Span};

use crate::{
    codec::{self, LineCodec},
    identity::{Identifier, Identity},
    reply::{Reply, ReplyEncoder},
};

/// A single connection to the server, and the queue of replies waiting to be sent to it.
pub struct Client {
    pub user: String,
    pub host: String,
    pub mode: String,
    /// Name of the server the client is connected to, used to mask their host.
    server_name: String,
    identity: Identity,
    /// Shares the current identity with the writer, which needs the latest nick to address
    /// numeric replies.
    identity_tx: watch::Sender<Identity>,
    replies: UnboundedSender<Arc<Reply>>,
}

impl Client {
    /// Creates a new client, returning the receiving half of its reply queue which should
    /// be handed to a writer via [`ClientOutbound::spawn`].
    #[must_use]
    pub fn new(
        nick: &str,
        user: &str,
        host: &str,
        server: &impl Identifier,
    ) -> (Self, ClientOutbound) {
        let identity = build_identity(nick, user, host, server.id());
        let (identity_tx, identity_rx) = watch::channel(identity.clone());
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        let client = Self {
            user: user.to_string(),
            host: host.to_string(),
            mode: "+i".to_string(),
            server_name: server.id().to_string(),
            identity,
            identity_tx,
            replies: replies_tx,
        };

        let outbound = ClientOutbound {
            identity: identity_rx,
            replies: replies_rx,
        };

        (client, outbound)
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.identity = build_identity(nick, &self.user, &self.host, &self.server_name);
        self.identity_tx.send_replace(self.identity.clone());
    }

    /// Queues a reply to be rendered for, and sent to, this client.
    ///
    /// Replies are written in the order they're queued.
    pub fn reply(&self, reply: impl Into<Arc<Reply>>) {
        if self.replies.send(reply.into()).is_err() {
            debug!(nick = self.nick(), "Dropping reply for disconnected client");
        }
    }
}

impl Identifier for Client {
    fn id(&self) -> &str {
        self.identity.id()
    }

    fn public_id(&self) -> &str {
        self.identity.public_id()
    }

    fn nick(&self) -> &str {
        self.identity.nick()
    }
}

fn build_identity(nick: &str, user: &str, host: &str, server_name: &str) -> Identity {
    Identity::new(
        format!("{nick}!{user}@{host}"),
        format!("{nick}!{user}@{server_name}"),
        nick,
    )
}

/// The receiving end of a client's reply queue.
pub struct ClientOutbound {
    identity: watch::Receiver<Identity>,
    replies: UnboundedReceiver<Arc<Reply>>,
}

impl ClientOutbound {
    /// Spawns a task rendering each queued reply for the client and writing the lines to
    /// `writer`. The task ends once every handle to the client has been dropped, or
    /// writing fails.
    pub fn spawn<W>(self, encoder: ReplyEncoder, writer: W) -> JoinHandle<Result<(), codec::Error>>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tokio::spawn(self.run(encoder, writer, Span::current()))
    }

    #[instrument(parent = &span, skip_all)]
    async fn run<W>(
        mut self,
        encoder: ReplyEncoder,
        writer: W,
        span: Span,
    ) -> Result<(), codec::Error>
    where
        W: AsyncWrite + Unpin,
    {
        let mut writer = FramedWrite::new(writer, LineCodec::new(encoder.max_line_bytes()));

        while let Some(reply) = self.replies.recv().await {
            // render against the nick as it is right now, without holding the borrow
            // across the writes below
            let lines = {
                let recipient = self.identity.borrow();
                encoder.render(&reply, &*recipient)
            };

            for line in lines {
                // a single malformed line shouldn't cut the client off, only a broken
                // connection does
                match writer.feed(line).await {
                    Ok(()) => {}
                    Err(codec::Error::Io(error)) => return Err(error.into()),
                    Err(error) => warn!(%error, "Dropping line that can't be sent to client"),
                }
            }

            writer.flush().await?;
        }

        debug!("Reply queue closed, shutting down writer");

        writer.close().await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use tokio::io::AsyncReadExt;

    use crate::{
        client::Client,
        config::Config,
        identity::{Identifier, Identity},
        reply::{catalog, ReplyEncoder},
        room::Room,
    };

    fn server() -> Identity {
        Identity::named("my.cool.server")
    }

    #[test]
    fn identity_masks_host_publicly() {
        let (client, _outbound) = Client::new("alice", "al", "10.0.0.1", &server());
        assert_eq!(client.id(), "alice!al@10.0.0.1");
        assert_eq!(client.public_id(), "alice!al@my.cool.server");
        assert_eq!(client.nick(), "alice");
    }

    #[tokio::test]
    async fn writes_replies_in_order() {
        let (client, outbound) = Client::new("alice", "al", "10.0.0.1", &server());
        let (writer, mut reader) = tokio::io::duplex(4096);
        let handle = outbound.spawn(ReplyEncoder::new(Arc::new(Config::default())), writer);

        let mut room = Room::new("#test", &server());
        room.join("alice");
        room.join("bob");

        client.reply(catalog::join(&room, &client));
        client.reply(catalog::names(&room));
        drop(client);

        handle.await.unwrap().unwrap();

        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();

        assert_eq!(
            out,
            ":alice!al@10.0.0.1 JOIN #test\r\n\
             :my.cool.server 353 alice = #test :alice bob\r\n\
             :#test 366 alice :End of NAMES list\r\n"
        );
    }

    #[tokio::test]
    async fn unsendable_line_does_not_stop_later_replies() {
        let (client, outbound) = Client::new("alice", "al", "10.0.0.1", &server());
        let bob = Identity::new("bob!b@host", "bob!b@my.cool.server", "bob");
        let (writer, mut reader) = tokio::io::duplex(4096);
        let handle = outbound.spawn(ReplyEncoder::new(Arc::new(Config::default())), writer);

        let mut room = Room::new("#test", &server());
        room.join("alice");

        client.reply(catalog::privmsg(&bob, &client, &"x".repeat(600)));
        client.reply(catalog::privmsg(&bob, &client, "one\r\nQUIT :two"));
        client.reply(catalog::names(&room));
        drop(client);

        handle.await.unwrap().unwrap();

        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();

        assert_eq!(
            out,
            ":my.cool.server 353 alice = #test :alice\r\n\
             :#test 366 alice :End of NAMES list\r\n"
        );
    }

    #[tokio::test]
    async fn nick_change_readdresses_later_replies() {
        let (mut client, outbound) = Client::new("alice", "al", "10.0.0.1", &server());
        let (writer, mut reader) = tokio::io::duplex(4096);

        client.set_nick("alicia");
        client.reply(catalog::end_of_names(&server()));
        drop(client);

        outbound
            .spawn(ReplyEncoder::new(Arc::new(Config::default())), writer)
            .await
            .unwrap()
            .unwrap();

        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();

        assert_eq!(out, ":my.cool.server 366 alicia :End of NAMES list\r\n");
    }
}
