//! HTTP surface
//!
//! A single multipart endpoint turns an audio upload into a note;
//! failures always come back as a renderable placeholder note.

mod handlers;
mod response;
mod router;
mod state;

pub use handlers::AUDIO_FIELD;
pub use response::{
    ApiFailure, ErrorResponse, NoteResponse, FAILURE_TITLE, RETRY_GUIDANCE, SUCCESS_MESSAGE,
};
pub use router::{create_router, HEALTH_PATH, PROCESS_AUDIO_PATH};
pub use state::AppState;
