#![deny(clippy::nursery, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use clap::Parser;
use futures::SinkExt;
use ircreply::{
    codec::LineCodec,
    config::{Args, Config},
    identity::Identity,
    reply::{catalog, ReplyEncoder},
    room::Room,
    server::ServerIdentity,
};
use tokio::io::AsyncReadExt;
use tokio_util::codec::FramedWrite;
use tracing::{info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse CLI arguments
    let opts: Args = Args::parse();

    // overrides the RUST_LOG variable to our own value based on the
    // amount of `-v`s that were passed when calling the service
    std::env::set_var(
        "RUST_LOG",
        match opts.verbose {
            1 => "debug",
            2 => "trace",
            _ => "info",
        },
    );

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .pretty();
    subscriber.init();

    let config = Arc::new(opts.config.unwrap_or_default());
    let span = info_span!("names", room = %opts.room, nick = %opts.nick);

    write_names(config, opts.room, opts.nick).instrument(span).await
}

/// Reads nicks from stdin and writes the names reply a user with `nick` would receive
/// after joining `room_name`.
async fn write_names(config: Arc<Config>, room_name: String, nick: String) -> anyhow::Result<()> {
    let server = ServerIdentity::new(&config);
    let encoder = ReplyEncoder::new(config);

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let mut room = Room::new(room_name, &server);
    for member in input.split_whitespace() {
        room.join(member);
    }

    let recipient = Identity::named(&nick);
    let lines = encoder.render(&catalog::names(&room), &recipient);

    info!(
        members = room.nicks().len(),
        lines = lines.len(),
        "Rendered names reply"
    );

    let codec = LineCodec::new(encoder.max_line_bytes());
    let mut writer = FramedWrite::new(tokio::io::stdout(), codec);
    for line in lines {
        writer.feed(line).await?;
    }
    writer.flush().await?;

    Ok(())
}
