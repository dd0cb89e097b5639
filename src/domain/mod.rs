mod attachment;
mod cdn_proxy;
mod interaction;
mod message_link;

pub use attachment::Attachment;
pub use cdn_proxy::{CdnProxy, DISCORD_CDN_BASE, ProxiedUrlError};
pub use interaction::{
    CommandData, CommandKind, Interaction, InteractionHandle, InteractionType, ResolvedData,
    ResolvedMessage,
};
pub use message_link::MessageLink;
