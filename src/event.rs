use crate::guide::GuideError;
use crate::ui::response::NavigationResponse;

/// Messages sent from background tasks to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    GuideReplied {
        generation: u64,
        message: String,
        result: Result<NavigationResponse, GuideError>,
    },
}
