use log::{error, info, warn};

use warbler_frontend::notice::{Notice, NoticeLevel, Notifier};
use warbler_frontend::page::Renderer;
use warbler_frontend::view_model::ViewChange;

/// Prints notices to the terminal through the logger.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warning => warn!("{}", notice.text),
            NoticeLevel::Error => error!("{}", notice.text),
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&mut self, change: &ViewChange) {
        match change {
            ViewChange::LikeStateChanged { message_id, state } => {
                info!("message {} is now {}", message_id, state.form_class())
            }
            ViewChange::FragmentPrepended { context, fragment } => {
                info!("#{} <- {}", context.container_id(), fragment.markup().trim())
            }
        }
    }
}
