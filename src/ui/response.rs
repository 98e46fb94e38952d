use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const MAX_CHIPS: usize = 6;
pub const HOME_CHIP: &str = "🏠 Accueil";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Home,
    Gallery,
    ArtworkDetail,
    Chat,
    Quotes,
    AtelierHub,
    Game,
    Atelier,
    Result,
    Heritage,
    Souvenirs,
    Projection,
    Unknown(String),
}

impl ScreenId {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "accueil" => Self::Home,
            "galerie" => Self::Gallery,
            "detail_oeuvre" => Self::ArtworkDetail,
            "chat" => Self::Chat,
            "citations" => Self::Quotes,
            "atelier_hub" => Self::AtelierHub,
            "jeu" => Self::Game,
            "atelier" => Self::Atelier,
            "resultat" => Self::Result,
            "heritage" => Self::Heritage,
            "souvenirs" => Self::Souvenirs,
            "projection" => Self::Projection,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Home => "accueil",
            Self::Gallery => "galerie",
            Self::ArtworkDetail => "detail_oeuvre",
            Self::Chat => "chat",
            Self::Quotes => "citations",
            Self::AtelierHub => "atelier_hub",
            Self::Game => "jeu",
            Self::Atelier => "atelier",
            Self::Result => "resultat",
            Self::Heritage => "heritage",
            Self::Souvenirs => "souvenirs",
            Self::Projection => "projection",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScreenId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScreenId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cta {
    pub label: String,
    #[serde(default)]
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    #[serde(
        rename = "oeuvre_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub artwork_id: Option<String>,
    /// `vitrail`, `peinture`, `parcours` or `libre`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_index: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseContext {
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
            ..Self::default()
        }
    }

    pub fn with_creation_index(index: usize) -> Self {
        Self {
            creation_index: Some(index),
            ..Self::default()
        }
    }
}

/// Accepts `3`, `3.0` or `"3"`. Anything negative or non-numeric is treated
/// as absent rather than failing the whole reply.
fn deserialize_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|value| *value >= 0.0 && value.fract() == 0.0)
                    .map(|value| value as u64)
            })
            .and_then(|value| usize::try_from(value).ok()),
        Some(Value::String(text)) => text.trim().parse::<usize>().ok(),
        _ => None,
    })
}

/// The structured reply that decides which screen is shown and what it says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub screen: ScreenId,
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub on_screen: String,
    #[serde(default)]
    pub chips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
    #[serde(default)]
    pub context: ResponseContext,
}

impl NavigationResponse {
    pub fn new(
        screen: ScreenId,
        voice: impl Into<String>,
        on_screen: impl Into<String>,
        chips: &[&str],
    ) -> Self {
        Self {
            screen,
            voice: voice.into(),
            on_screen: on_screen.into(),
            chips: chips.iter().map(|chip| chip.to_string()).collect(),
            cta: None,
            context: ResponseContext::default(),
        }
    }

    pub fn with_context(mut self, context: ResponseContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_cta(mut self, label: impl Into<String>, route: impl Into<String>) -> Self {
        self.cta = Some(Cta {
            label: label.into(),
            route: route.into(),
            params: None,
        });
        self
    }

    /// The screen shown before the first exchange.
    pub fn welcome() -> Self {
        Self::new(
            ScreenId::Home,
            "Bienvenue! On teste la couleur et la lumière. Prêt pour le Parcours Éclat?",
            "Choisis ton aventure",
            &[
                "Parcours Éclat",
                "Voir la galerie",
                "Créer maintenant",
                "Parler à Marcelle",
                HOME_CHIP,
            ],
        )
        .with_cta("Lancer Parcours Éclat", "parcours-eclat")
        .with_context(ResponseContext::with_mode("parcours"))
    }

    /// Trims labels, drops empty chips and keeps at most [`MAX_CHIPS`].
    pub fn normalize(mut self) -> Self {
        self.voice = self.voice.trim().to_string();
        self.on_screen = self.on_screen.trim().to_string();
        self.chips = self
            .chips
            .into_iter()
            .map(|chip| chip.trim().to_string())
            .filter(|chip| !chip.is_empty())
            .take(MAX_CHIPS)
            .collect();
        if let Some(cta) = &self.cta {
            if cta.label.trim().is_empty() {
                self.cta = None;
            }
        }
        self
    }
}
