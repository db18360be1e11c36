//! Marketing content domain types (hero carousel, main message).

use chrono::{DateTime, Utc};
use serde::Serialize;

use cyna_core::{HeroSlideId, MainMessageId, MessageSeverity};

/// A slide in the storefront hero carousel.
#[derive(Debug, Clone, Serialize)]
pub struct HeroCarouselSlide {
    /// Unique slide ID.
    pub id: HeroSlideId,
    /// Headline text.
    pub title: String,
    /// Secondary text.
    pub subtitle: String,
    /// Background/illustration image.
    pub image_url: String,
    /// Optional click-through target.
    pub link_url: Option<String>,
    /// Position in the carousel.
    pub sort_order: i32,
    /// Whether the slide is shown.
    pub active: bool,
    /// When the slide was created.
    pub created_at: DateTime<Utc>,
    /// When the slide was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The storefront-wide banner message.
///
/// At most one message is active at a time; the repository enforces this
/// when activating.
#[derive(Debug, Clone, Serialize)]
pub struct MainMessage {
    /// Unique message ID.
    pub id: MainMessageId,
    /// Banner text.
    pub body: String,
    /// Visual flavor.
    pub severity: MessageSeverity,
    /// Whether this is the currently shown message.
    pub active: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// When the message was last updated.
    pub updated_at: DateTime<Utc>,
}
