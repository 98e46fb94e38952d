use crate::ui::response::{NavigationResponse, ScreenId, HOME_CHIP};

/// Substrings that mean the visitor asked to leave the dialogue.
pub const NAVIGATION_KEYWORDS: [&str; 10] = [
    "accueil",
    "retour",
    "parcours",
    "galerie",
    "atelier",
    "jeu",
    "souvenirs",
    "projection",
    "héritage",
    "heritage",
];
pub const HOME_CHIP_MARKER: &str = "🏠";
pub const CHAT_FALLBACK_HEADING: &str = "Dialogue avec Marcelle";
pub const CHAT_FALLBACK_CHIPS: [&str; 6] = [
    "Mon enfance",
    "Le vitrail",
    "Créer librement",
    "Être artiste",
    "Conseil pour aujourd'hui",
    HOME_CHIP,
];

pub fn mentions_navigation(message: &str) -> bool {
    let lowered = message.to_lowercase();
    NAVIGATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

pub fn is_home_chip(message: &str) -> bool {
    message.contains(HOME_CHIP_MARKER)
}

/// Decides the screen actually shown for `response`.
///
/// A reply that drops the visitor from the dialogue back to the home screen
/// is kept in the dialogue unless the message clearly asked to navigate.
pub fn resolve(
    prior: Option<&ScreenId>,
    message: &str,
    response: NavigationResponse,
) -> NavigationResponse {
    let stays_in_chat = matches!(prior, Some(ScreenId::Chat))
        && response.screen == ScreenId::Home
        && !is_home_chip(message)
        && !mentions_navigation(message);
    if !stays_in_chat {
        return response;
    }

    tracing::debug!(message_len = message.len(), "home reply coerced back to chat");
    coerce_to_chat(response)
}

fn coerce_to_chat(mut response: NavigationResponse) -> NavigationResponse {
    response.screen = ScreenId::Chat;
    if response.on_screen.trim().is_empty() {
        response.on_screen = CHAT_FALLBACK_HEADING.to_string();
    }
    if response.chips.is_empty() {
        response.chips = CHAT_FALLBACK_CHIPS
            .iter()
            .map(|chip| chip.to_string())
            .collect();
    }
    response
}
