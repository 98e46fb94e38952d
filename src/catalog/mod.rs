//! Read-only artwork catalogue, bundled with the binary.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The catalogue document as shipped. The guide prompt embeds it verbatim.
pub const CATALOGUE_JSON: &str = include_str!("catalogue.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    pub meta: CatalogueMeta,
    #[serde(rename = "global_ui")]
    pub global: GlobalPrompts,
    #[serde(rename = "oeuvres")]
    pub artworks: Vec<Artwork>,
    #[serde(rename = "heritage_module")]
    pub heritage: HeritageModule,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueMeta {
    pub lang: String,
    pub version: String,
    #[serde(rename = "public")]
    pub audience: String,
    pub format: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalPrompts {
    #[serde(rename = "chips_questions_generales", default)]
    pub general_questions: Vec<String>,
    #[serde(rename = "defi_format_2min", default)]
    pub challenge_format: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkKind {
    Peinture,
    Vitrail,
}

impl ArtworkKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Peinture => "Peinture",
            Self::Vitrail => "Vitrail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ArtworkKind,
    #[serde(rename = "energie")]
    pub energy: String,
    #[serde(rename = "couleurs_tags", default)]
    pub color_tags: Vec<String>,
    #[serde(rename = "pitch_10s")]
    pub pitch: String,
    #[serde(rename = "phrase_inspiree")]
    pub quote: String,
    #[serde(rename = "pont_science_20s")]
    pub science_bridge: String,
    #[serde(rename = "defi_2min", default)]
    pub challenge: Vec<String>,
    #[serde(rename = "questions_rapides", default)]
    pub quick_questions: Vec<String>,
    #[serde(rename = "palette_atelier", default)]
    pub palette: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeritageModule {
    pub video: HeritageVideo,
    #[serde(rename = "boutons", default)]
    pub buttons: Vec<HeritageButton>,
    pub final_cta: HeritageCta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeritageVideo {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "duree_cible")]
    pub target_duration: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeritageButton {
    pub id: String,
    pub label: String,
    pub microcopy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeritageCta {
    pub label: String,
    pub route: String,
}

impl Catalogue {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn find(&self, id: &str) -> Option<&Artwork> {
        let id = id.trim();
        self.artworks.iter().find(|artwork| artwork.id == id)
    }
}

/// The bundled catalogue, parsed once on first use.
pub fn catalogue() -> &'static Catalogue {
    static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();
    CATALOGUE.get_or_init(|| {
        Catalogue::from_json(CATALOGUE_JSON).unwrap_or_else(|err| {
            tracing::error!(%err, "bundled catalogue is invalid; gallery will be empty");
            Catalogue::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogue_parses() {
        let parsed =
            Catalogue::from_json(CATALOGUE_JSON).expect("bundled catalogue should be valid JSON");
        assert_eq!(parsed.meta.lang, "fr");
        assert_eq!(parsed.artworks.len(), 12);
        let count = |kind| parsed.artworks.iter().filter(|artwork| artwork.kind == kind).count();
        assert_eq!(count(ArtworkKind::Peinture), 7);
        assert_eq!(count(ArtworkKind::Vitrail), 5);
        assert_eq!(parsed.heritage.buttons.len(), 3);
        assert_eq!(parsed.heritage.final_cta.route, "atelier-jeu");
    }

    #[test]
    fn every_artwork_carries_a_full_palette() {
        for artwork in &catalogue().artworks {
            assert_eq!(artwork.palette.len(), 6, "{} palette", artwork.id);
            assert!(
                artwork.palette.iter().all(|color| color.starts_with('#')),
                "{} palette should be hex colors",
                artwork.id
            );
            assert!(!artwork.challenge.is_empty(), "{} challenge", artwork.id);
        }
    }

    #[test]
    fn find_is_exact_on_trimmed_ids() {
        let found = catalogue()
            .find(" FERRON_P03 ")
            .expect("FERRON_P03 should be found");
        assert_eq!(found.title, "Bleu électrique");
        assert_eq!(found.kind, ArtworkKind::Peinture);
        assert!(catalogue().find("FERRON_X99").is_none());
        assert!(catalogue().find("ferron_p03").is_none());
    }
}
