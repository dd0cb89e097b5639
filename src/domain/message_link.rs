use std::fmt;

/// Permalink to a message, shown alongside its transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLink(String);

impl MessageLink {
    /// Direct-message channels have no guild id; their permalinks use the
    /// `@me` placeholder instead.
    pub fn new(guild_id: Option<&str>, channel_id: &str, message_id: &str) -> Self {
        let guild = guild_id.unwrap_or("@me");
        Self(format!(
            "https://discord.com/channels/{}/{}/{}",
            guild, channel_id, message_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
