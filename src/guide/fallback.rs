//! Canned replies used whenever the guide cannot be reached.

use crate::atelier::CreativeMode;
use crate::catalog::{catalogue, Artwork};
use crate::ui::response::{NavigationResponse, ResponseContext, ScreenId, HOME_CHIP, MAX_CHIPS};

/// Which canned reply a message maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackRoute {
    Finished,
    Projection(usize),
    Atelier(CreativeMode),
    AtelierHub,
    ArtworkDetail(String),
    Gallery,
    Heritage,
    Souvenirs,
    Home,
}

/// First matching keyword wins; matching ignores case.
pub fn classify(message: &str) -> FallbackRoute {
    let lowered = message.to_lowercase();
    let has = |terms: &[&str]| terms.iter().any(|term| lowered.contains(term));

    if has(&["terminé"]) {
        return FallbackRoute::Finished;
    }
    if let Some(number) = creation_number(&lowered) {
        return match number.checked_sub(1) {
            Some(index) => FallbackRoute::Projection(index),
            None => FallbackRoute::Souvenirs,
        };
    }
    if has(&["vitrail"]) {
        return FallbackRoute::Atelier(CreativeMode::Geometric);
    }
    if has(&["peinture"]) {
        return FallbackRoute::Atelier(CreativeMode::Freehand);
    }
    if has(&["créer", "creer", "atelier"]) {
        return FallbackRoute::AtelierHub;
    }
    if let Some(artwork) = mentioned_artwork(message) {
        return FallbackRoute::ArtworkDetail(artwork.id.clone());
    }
    if has(&["galerie", "œuvre", "oeuvre"]) {
        return FallbackRoute::Gallery;
    }
    if has(&["héritage", "heritage"]) {
        return FallbackRoute::Heritage;
    }
    if has(&["souvenir"]) {
        return FallbackRoute::Souvenirs;
    }
    FallbackRoute::Home
}

/// Deterministic reply for `message`. Never fails.
pub fn respond(message: &str) -> NavigationResponse {
    let route = classify(message);
    tracing::debug!(?route, "offline fallback reply");
    match route {
        FallbackRoute::Finished => NavigationResponse::new(
            ScreenId::Souvenirs,
            "Bravo! Ton œuvre est enregistrée. La voici sur le mur des souvenirs. Touches-en une pour la voir en grand.",
            "Mur de Souvenirs",
            &["Créer une autre œuvre", "Explorer la galerie", HOME_CHIP],
        ),
        FallbackRoute::Projection(index) => NavigationResponse::new(
            ScreenId::Projection,
            "La voici en grand! Prends le temps de la regarder.",
            "Projection",
            &["Retour au mur des souvenirs", "Créer une autre œuvre", HOME_CHIP],
        )
        .with_context(ResponseContext::with_creation_index(index)),
        FallbackRoute::Atelier(CreativeMode::Geometric) => NavigationResponse::new(
            ScreenId::Atelier,
            "On assemble des éclats de couleur! Ajoute des formes et joue avec la lumière.",
            "Atelier vitrail",
            &["Un défi rapide!", "Le lien avec la science?", HOME_CHIP],
        )
        .with_context(ResponseContext::with_mode(CreativeMode::Geometric.as_hint())),
        FallbackRoute::Atelier(CreativeMode::Freehand) => NavigationResponse::new(
            ScreenId::Atelier,
            "Prends ton pinceau! Ose les couleurs fortes.",
            "Atelier peinture",
            &["Un défi rapide!", "Pourquoi autant de couleurs?", HOME_CHIP],
        )
        .with_context(ResponseContext::with_mode(CreativeMode::Freehand.as_hint())),
        FallbackRoute::AtelierHub => NavigationResponse::new(
            ScreenId::AtelierHub,
            "Vitrail ou peinture? Choisis ton style!",
            "Choisis ton style",
            &[
                "Je veux créer en style vitrail",
                "Je veux créer en style peinture",
                HOME_CHIP,
            ],
        ),
        FallbackRoute::ArtworkDetail(id) => artwork_detail(&id),
        FallbackRoute::Gallery => NavigationResponse::new(
            ScreenId::Gallery,
            "Voici mes œuvres. Touche celle qui t'attire!",
            "La galerie",
            &["Je veux créer", "Une phrase inspirante?", HOME_CHIP],
        ),
        FallbackRoute::Heritage => heritage(),
        FallbackRoute::Souvenirs => NavigationResponse::new(
            ScreenId::Souvenirs,
            "Voici le mur des souvenirs. Touche une création pour la voir en grand.",
            "Mur de Souvenirs",
            &["Créer une autre œuvre", "Explorer la galerie", HOME_CHIP],
        ),
        FallbackRoute::Home => NavigationResponse::new(
            ScreenId::Home,
            "Mon atelier est un peu loin pour l'instant, mais on peut quand même créer! Choisis ton aventure.",
            "Choisis ton aventure",
            &["Parcours Éclat", "Voir la galerie", "Créer maintenant", HOME_CHIP],
        ),
    }
}

/// Parses "création numéro N" (accents optional) into N.
fn creation_number(lowered: &str) -> Option<usize> {
    let rest = ["création numéro", "creation numero", "création numero", "creation numéro"]
        .iter()
        .find_map(|marker| lowered.find(marker).map(|at| &lowered[at + marker.len()..]))?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn mentioned_artwork(message: &str) -> Option<&'static Artwork> {
    catalogue()
        .artworks
        .iter()
        .find(|artwork| message.contains(artwork.id.as_str()))
}

fn artwork_detail(id: &str) -> NavigationResponse {
    let Some(artwork) = catalogue().find(id) else {
        return respond("galerie");
    };
    let mut chips: Vec<&str> = artwork
        .quick_questions
        .iter()
        .map(String::as_str)
        .take(MAX_CHIPS - 2)
        .collect();
    chips.push("Un défi rapide!");
    chips.push(HOME_CHIP);
    NavigationResponse::new(
        ScreenId::ArtworkDetail,
        artwork.pitch.clone(),
        artwork.title.clone(),
        &chips,
    )
    .with_context(ResponseContext {
        artwork_id: Some(artwork.id.clone()),
        ..ResponseContext::default()
    })
}

fn heritage() -> NavigationResponse {
    let module = &catalogue().heritage;
    let mut chips: Vec<&str> = module
        .buttons
        .iter()
        .map(|button| button.label.as_str())
        .collect();
    chips.push(HOME_CHIP);
    NavigationResponse::new(
        ScreenId::Heritage,
        module.video.caption.clone(),
        module.video.title.clone(),
        &chips,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::finished(
        "Mon œuvre est terminée. Propose-moi d'aller au mur de souvenirs.",
        FallbackRoute::Finished
    )]
    #[case::projection("Je veux voir ma création numéro 3", FallbackRoute::Projection(2))]
    #[case::projection_without_accents("creation numero 1", FallbackRoute::Projection(0))]
    #[case::projection_zero("création numéro 0", FallbackRoute::Souvenirs)]
    #[case::vitrail(
        "Je veux créer en style vitrail",
        FallbackRoute::Atelier(CreativeMode::Geometric)
    )]
    #[case::peinture(
        "Je veux créer en style PEINTURE",
        FallbackRoute::Atelier(CreativeMode::Freehand)
    )]
    #[case::create("Je veux créer", FallbackRoute::AtelierHub)]
    #[case::create_again("Créer une autre œuvre", FallbackRoute::AtelierHub)]
    #[case::artwork(
        "Montre-moi l'œuvre \"Prisme\" (ID: FERRON_V04)",
        FallbackRoute::ArtworkDetail("FERRON_V04".to_string())
    )]
    #[case::gallery("Je veux voir les œuvres", FallbackRoute::Gallery)]
    #[case::heritage("Son HÉRITAGE", FallbackRoute::Heritage)]
    #[case::souvenirs("Retour au mur des souvenirs", FallbackRoute::Souvenirs)]
    #[case::anything_else("Mon enfance", FallbackRoute::Home)]
    fn keyword_table(#[case] message: &str, #[case] expected: FallbackRoute) {
        assert_eq!(classify(message), expected);
    }

    #[test]
    fn vitrail_reply_opens_the_geometric_atelier() {
        let reply = respond("Je veux créer en style vitrail");
        assert_eq!(reply.screen, ScreenId::Atelier);
        assert_eq!(reply.context.mode.as_deref(), Some("vitrail"));
        assert!(!reply.chips.is_empty());
    }

    #[test]
    fn projection_reply_carries_the_index() {
        let reply = respond("Je veux voir ma création numéro 2");
        assert_eq!(reply.screen, ScreenId::Projection);
        assert_eq!(reply.context.creation_index, Some(1));
    }

    #[test]
    fn every_reply_offers_between_three_and_six_chips() {
        for message in [
            "terminé",
            "création numéro 1",
            "vitrail",
            "peinture",
            "créer",
            "FERRON_P01",
            "galerie",
            "heritage",
            "souvenirs",
            "bonjour",
        ] {
            let reply = respond(message);
            assert!(
                (3..=MAX_CHIPS).contains(&reply.chips.len()),
                "{message} gave {} chips",
                reply.chips.len()
            );
        }
    }

    #[test]
    fn artwork_reply_points_at_the_artwork() {
        let reply = respond("(ID: FERRON_P02)");
        assert_eq!(reply.screen, ScreenId::ArtworkDetail);
        assert_eq!(reply.context.artwork_id.as_deref(), Some("FERRON_P02"));
        assert_eq!(reply.on_screen, "Noir en mouvement");
    }
}
