//! Message processing
//!
//! Runs a message through the TEA update loop and dispatches the
//! resulting actions.

use tokio::sync::mpsc;

use crate::actions::{handle_action, AppServices, DetectionTask};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &AppServices,
    detection_task: &mut DetectionTask,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), services, detection_task);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
