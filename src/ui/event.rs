/// What a screen asks the app to do. Screens never mutate the session
/// store directly.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// A chip, card, CTA or typed message, sent as if typed by the visitor.
    Submit(String),
    /// Export the atelier canvas, save it, then announce the finished work.
    FinishCreation,
}

impl UiAction {
    pub fn to_log_line(&self) -> String {
        match self {
            Self::Submit(message) => format!("submit len={} text={message}", message.len()),
            Self::FinishCreation => "finish_creation".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_name_the_action() {
        assert_eq!(
            UiAction::Submit("Je veux créer".to_string()).to_log_line(),
            "submit len=14 text=Je veux créer"
        );
        assert_eq!(UiAction::FinishCreation.to_log_line(), "finish_creation");
    }
}
