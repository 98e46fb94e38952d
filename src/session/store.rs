//! The single owner of conversation state, the current screen and the saved
//! creations. Every visitor action goes through [`SessionStore::send_message`].

use crate::error::KioskError;
use crate::guide::{fallback, GuideError};
use crate::session::{ConversationTurn, Role};
use crate::ui::navigation;
use crate::ui::response::{NavigationResponse, ScreenId};
use std::collections::VecDeque;

/// Everything the guide client needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideRequest {
    pub generation: u64,
    pub message: String,
    /// Transcript lines before `message`, oldest first.
    pub history: Vec<String>,
    pub screen_hint: Option<ScreenId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The guide failed and the offline reply was shown instead.
    FellBack,
    /// The reply belonged to a superseded request and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct PendingRequest {
    generation: u64,
    message: String,
    prior_screen: ScreenId,
}

#[derive(Debug)]
pub struct SessionStore {
    history: VecDeque<ConversationTurn>,
    creations: Vec<String>,
    response: NavigationResponse,
    pending: Option<PendingRequest>,
    generation: u64,
    next_turn_id: u64,
    max_history: usize,
    last_error: Option<String>,
}

impl SessionStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: VecDeque::new(),
            creations: Vec::new(),
            response: NavigationResponse::welcome(),
            pending: None,
            generation: 0,
            next_turn_id: 0,
            max_history: max_history.max(2),
            last_error: None,
        }
    }

    pub fn response(&self) -> &NavigationResponse {
        &self.response
    }

    pub fn screen(&self) -> &ScreenId {
        &self.response.screen
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn history(&self) -> impl Iterator<Item = &ConversationTurn> + '_ {
        self.history.iter()
    }

    /// Turns exchanged while on the chat screen, oldest first.
    pub fn dialogue(&self) -> impl Iterator<Item = &ConversationTurn> + '_ {
        self.history.iter().filter(|turn| turn.dialogue)
    }

    pub fn creations(&self) -> &[String] {
        &self.creations
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records the visitor's message and returns the request to send.
    /// Returns `None` for blank input and while a request is in flight.
    pub fn send_message(&mut self, message: &str) -> Option<GuideRequest> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        if let Some(pending) = &self.pending {
            tracing::debug!(
                generation = pending.generation,
                "input ignored while a request is in flight"
            );
            return None;
        }

        let history = self
            .history
            .iter()
            .map(ConversationTurn::transcript_line)
            .collect();
        let dialogue = self.response.screen == ScreenId::Chat;
        self.generation += 1;
        self.last_error = None;
        self.push_turn(Role::User, message.to_string(), None, dialogue);
        self.pending = Some(PendingRequest {
            generation: self.generation,
            message: message.to_string(),
            prior_screen: self.response.screen.clone(),
        });

        Some(GuideRequest {
            generation: self.generation,
            message: message.to_string(),
            history,
            screen_hint: Some(self.response.screen.clone()),
        })
    }

    /// Applies the outcome of request `generation`. Failures are replaced by
    /// the offline reply for the same message; replies to superseded
    /// requests are discarded.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<NavigationResponse, GuideError>,
    ) -> Completion {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == generation);
        if !is_current {
            tracing::debug!(generation, current = self.generation, "stale guide reply discarded");
            return Completion::Stale;
        }
        let Some(pending) = self.pending.take() else {
            return Completion::Stale;
        };

        let (reply, completion) = match result {
            Ok(reply) => (reply.normalize(), Completion::Applied),
            Err(err) => {
                tracing::warn!(generation, %err, "guide unavailable; using offline reply");
                self.last_error = Some(err.to_string());
                (fallback::respond(&pending.message), Completion::FellBack)
            }
        };

        let payload = match serde_json::to_string(&reply) {
            Ok(payload) => Some(payload),
            Err(err) => {
                let err = KioskError::from(err);
                tracing::warn!(generation, %err, "reply kept without a history payload");
                None
            }
        };
        let dialogue = pending.prior_screen == ScreenId::Chat;
        let resolved = navigation::resolve(Some(&pending.prior_screen), &pending.message, reply);
        self.push_turn(Role::Assistant, resolved.voice.clone(), payload, dialogue);
        self.response = resolved;
        completion
    }

    /// Stores an exported creation and returns its index.
    pub fn save_creation(&mut self, data_uri: String) -> usize {
        self.creations.push(data_uri);
        let index = self.creations.len() - 1;
        tracing::info!(index, bytes = self.creations[index].len(), "creation saved");
        index
    }

    /// Starts over for the next visitor. Creations stay on the wall; any
    /// in-flight reply becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.history.clear();
        self.last_error = None;
        self.response = NavigationResponse::welcome();
        tracing::info!(generation = self.generation, "session reset");
    }

    fn push_turn(&mut self, role: Role, text: String, payload: Option<String>, dialogue: bool) {
        self.history.push_back(ConversationTurn {
            id: self.next_turn_id,
            role,
            text,
            payload,
            dialogue,
        });
        self.next_turn_id += 1;
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(screen: ScreenId, voice: &str) -> NavigationResponse {
        NavigationResponse::new(screen, voice, "", &["A", "B", "C"])
    }

    #[test]
    fn starts_on_the_welcome_screen() {
        let store = SessionStore::new(200);
        assert_eq!(store.screen(), &ScreenId::Home);
        assert!(!store.is_loading());
        assert_eq!(store.history().count(), 0);
    }

    #[test]
    fn request_carries_prior_history_and_screen_hint() {
        let mut store = SessionStore::new(200);
        let first = store.send_message("Je veux créer").expect("first send should start");
        assert!(first.history.is_empty());
        assert_eq!(first.screen_hint, Some(ScreenId::Home));
        store.complete(first.generation, Ok(reply(ScreenId::AtelierHub, "Choisis!")));

        let second = store
            .send_message("style vitrail")
            .expect("second send should start");
        assert_eq!(second.history.len(), 2);
        assert_eq!(second.history[0], "User: Je veux créer");
        assert!(second.history[1].starts_with("AI: {"));
        assert_eq!(second.screen_hint, Some(ScreenId::AtelierHub));
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let mut store = SessionStore::new(200);
        let request = store.send_message("Bonjour").expect("send should start");
        assert!(store.is_loading());
        assert!(store.send_message("Encore").is_none());
        assert!(store.send_message("   ").is_none());
        assert_eq!(store.history().count(), 1);

        store.complete(request.generation, Ok(reply(ScreenId::Chat, "Salut")));
        assert!(!store.is_loading());
    }

    #[test]
    fn history_is_appended_in_submission_order() {
        let mut store = SessionStore::new(200);
        let request = store.send_message("Bonjour").expect("send should start");
        store.complete(request.generation, Ok(reply(ScreenId::Chat, "Salut")));

        let roles: Vec<Role> = store.history().map(|turn| turn.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        let ids: Vec<u64> = store.history().map(|turn| turn.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn stale_reply_after_reset_is_discarded() {
        let mut store = SessionStore::new(200);
        let request = store.send_message("galerie").expect("send should start");
        store.reset();

        let completion = store.complete(request.generation, Ok(reply(ScreenId::Gallery, "Voilà")));
        assert_eq!(completion, Completion::Stale);
        assert_eq!(store.screen(), &ScreenId::Home);
        assert_eq!(store.history().count(), 0);
    }

    #[test]
    fn reply_for_an_older_generation_is_discarded() {
        let mut store = SessionStore::new(200);
        let first = store.send_message("un").expect("send should start");
        store.complete(first.generation, Ok(reply(ScreenId::Chat, "1")));
        let second = store.send_message("deux").expect("send should start");

        assert_eq!(
            store.complete(first.generation, Ok(reply(ScreenId::Gallery, "vieux"))),
            Completion::Stale
        );
        assert!(store.is_loading());
        assert_eq!(
            store.complete(second.generation, Ok(reply(ScreenId::Chat, "2"))),
            Completion::Applied
        );
    }

    #[test]
    fn collaborator_failure_falls_back_to_keyword_reply() {
        let mut store = SessionStore::new(200);
        let request = store
            .send_message("Je veux créer en style vitrail")
            .expect("send should start");

        let completion = store.complete(request.generation, Err(GuideError::MissingApiKey));
        assert_eq!(completion, Completion::FellBack);
        assert_eq!(store.screen(), &ScreenId::Atelier);
        assert_eq!(store.response().context.mode.as_deref(), Some("vitrail"));
        assert!(store.last_error().is_some());
        assert!(!store.is_loading());

        let atelier = crate::atelier::AtelierSession::from_response(
            store.response(),
            crate::catalog::catalogue(),
        );
        assert_eq!(atelier.mode(), crate::atelier::CreativeMode::Geometric);
        assert!(!atelier.palette().is_empty());
    }

    #[test]
    fn offline_dialogue_stays_in_chat() {
        let mut store = SessionStore::new(200);
        let request = store.send_message("Parler à Marcelle").expect("send should start");
        store.complete(request.generation, Ok(reply(ScreenId::Chat, "Je t'écoute")));

        let request = store.send_message("Mon enfance").expect("send should start");
        store.complete(request.generation, Err(GuideError::EmptyReply));
        assert_eq!(store.screen(), &ScreenId::Chat);
        assert!(!store.response().chips.is_empty());
        assert_eq!(store.last_error(), Some("guide reply was empty"));
    }

    #[test]
    fn dialogue_only_holds_turns_sent_from_chat() {
        let mut store = SessionStore::new(200);
        let request = store
            .send_message("Je veux créer en style vitrail")
            .expect("send should start");
        store.complete(request.generation, Ok(reply(ScreenId::Chat, "Parlons!")));
        assert_eq!(store.dialogue().count(), 0);

        let request = store.send_message("Mon enfance").expect("send should start");
        store.complete(request.generation, Ok(reply(ScreenId::Chat, "Raconte-moi.")));
        let request = store
            .send_message("Mon œuvre est terminée.")
            .expect("send should start");
        store.complete(request.generation, Ok(reply(ScreenId::Souvenirs, "Bravo!")));

        let dialogue: Vec<&str> = store.dialogue().map(|turn| turn.text.as_str()).collect();
        assert_eq!(
            dialogue,
            vec![
                "Mon enfance",
                "Raconte-moi.",
                "Mon œuvre est terminée.",
                "Bravo!"
            ]
        );
        assert_eq!(store.history().count(), 6);
    }

    #[test]
    fn history_is_bounded_oldest_first() {
        let mut store = SessionStore::new(4);
        for round in 0..5 {
            let request = store
                .send_message(&format!("message {round}"))
                .expect("send should start");
            store.complete(request.generation, Ok(reply(ScreenId::Chat, "ok")));
        }
        let turns: Vec<&ConversationTurn> = store.history().collect();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].text, "message 3");
        assert_eq!(turns[0].id, 6);
    }

    #[test]
    fn creations_are_addressed_by_index() {
        let mut store = SessionStore::new(200);
        assert_eq!(store.save_creation("data:image/svg+xml;base64,AA==".to_string()), 0);
        assert_eq!(store.save_creation("data:image/svg+xml;base64,AQ==".to_string()), 1);
        assert_eq!(store.creations()[1], "data:image/svg+xml;base64,AQ==");
        assert_eq!(store.creations().len(), 2);

        store.reset();
        assert_eq!(store.creations().len(), 2);
    }
}
