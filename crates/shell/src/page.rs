//! Static page structure: routes, navigation, player and instructions.

use std::fmt;

use rtspio_editor::LoadStatus;

/// Brand shown in the navigation bar.
pub const NAV_BRAND: &str = "RTSP.io";

pub const HOME_HEADING: &str = "RTSP Video Player";
pub const HOME_SUBTITLE: &str = "Watch your video stream with interactive overlay editor";
pub const PLAYER_HEADING: &str = "Live Video Stream";

pub const NO_STREAM_TITLE: &str = "No Stream Selected";
pub const NO_STREAM_HINT: &str = "Please provide a valid RTSP.me embed URL";
pub const LOADING_TITLE: &str = "Loading Overlays...";

/// Permissions granted to the embedded player.
pub const IFRAME_ALLOW: &str = "autoplay; fullscreen";

pub const INSTRUCTIONS_HEADING: &str = "How to Use Overlays";

/// Usage steps shown under the player, as `(title, text)`.
pub const INSTRUCTIONS: [(&str, &str); 7] = [
    (
        "Video Controls",
        "Use the built-in RTSP.me player controls for play/pause/volume",
    ),
    (
        "Enable Overlay Editor",
        "Click the \"Overlays\" button in the bottom-right corner",
    ),
    (
        "Add Overlays",
        "Click \"Add Overlay\" to choose between text or image overlays",
    ),
    (
        "Text Overlays",
        "Add text overlays that you can edit by clicking on them",
    ),
    (
        "Image Overlays",
        "Upload images or add images from URLs to display as overlays",
    ),
    (
        "Drag & Resize",
        "Drag overlays to move them, use corner handles to resize",
    ),
    (
        "Hide/Delete",
        "Use the overlay panel to hide or delete overlays",
    ),
];

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
        }
    }
}

/// Resolve a path to a route. Only `/` exists.
pub fn route(path: &str) -> Option<Route> {
    match path {
        "/" | "" => Some(Route::Home),
        _ => None,
    }
}

/// Navigation links as `(label, route)`.
pub const NAV_LINKS: [(&str, Route); 1] = [("Video Player", Route::Home)];

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Attributes of the embedded RTSP.me player frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IframeDescriptor {
    pub src: String,
    pub title: String,
    pub allow: &'static str,
    pub allow_fullscreen: bool,
}

/// What the player area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerView {
    /// No embed URL configured.
    NoStream,
    /// Overlays are still loading.
    Loading,
    Player(IframeDescriptor),
}

impl PlayerView {
    pub fn new(embed_url: &str, title: &str, status: &LoadStatus) -> Self {
        if embed_url.trim().is_empty() {
            return Self::NoStream;
        }
        if *status == LoadStatus::Loading {
            return Self::Loading;
        }
        Self::Player(IframeDescriptor {
            src: embed_url.trim().to_string(),
            title: title.to_string(),
            allow: IFRAME_ALLOW,
            allow_fullscreen: true,
        })
    }
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStream => write!(f, "[{NO_STREAM_TITLE}] {NO_STREAM_HINT}"),
            Self::Loading => write!(f, "[{LOADING_TITLE}]"),
            Self::Player(frame) => write!(
                f,
                "<iframe src=\"{}\" title=\"{}\" allow=\"{}\"{}>",
                frame.src,
                frame.title,
                frame.allow,
                if frame.allow_fullscreen { " allowfullscreen" } else { "" }
            ),
        }
    }
}

/// The whole home page as plain text.
pub struct HomePage<'a> {
    pub player: &'a PlayerView,
}

impl fmt::Display for HomePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<&str> = NAV_LINKS.iter().map(|(label, _)| *label).collect();
        writeln!(f, "{NAV_BRAND} | {}", links.join(" | "))?;
        writeln!(f)?;
        writeln!(f, "{HOME_HEADING}")?;
        writeln!(f, "{HOME_SUBTITLE}")?;
        writeln!(f)?;
        writeln!(f, "{PLAYER_HEADING}")?;
        writeln!(f, "  {}", self.player)?;
        writeln!(f)?;
        writeln!(f, "{INSTRUCTIONS_HEADING}")?;
        for (i, (title, text)) in INSTRUCTIONS.iter().enumerate() {
            writeln!(f, "  {}. {title}: {text}", i + 1)?;
        }
        Ok(())
    }
}
