use log::{error, warn};

use crate::api::ApiError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn class(self) -> &'static str {
        match self {
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

/// A transient, non-blocking message for the user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn for_error(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(_) => Notice {
                level: NoticeLevel::Warning,
                text: "Could not reach the server. Please try again.".into(),
            },
            ApiError::Rejected { message, .. } => Notice {
                level: NoticeLevel::Error,
                text: message.clone(),
            },
            ApiError::Malformed(_) => Notice {
                level: NoticeLevel::Error,
                text: "The server sent an unexpected response.".into(),
            },
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Logs a failed request and tells the user about it.
pub fn report(notifier: &dyn Notifier, action: &str, err: &ApiError) {
    match err {
        ApiError::Malformed(_) => error!("{} failed: {}", action, err),
        _ => warn!("{} failed: {}", action, err),
    }

    notifier.notify(Notice::for_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    #[test]
    fn rejection_surfaces_server_message() {
        let notifier = RecordingNotifier::default();
        let err = ApiError::Rejected {
            status: 400,
            message: "Message is too long".into(),
        };

        report(&notifier, "compose", &err);

        assert_eq!(
            *notifier.notices.borrow(),
            vec![Notice {
                level: NoticeLevel::Error,
                text: "Message is too long".into()
            }]
        );
    }

    #[test]
    fn transport_failure_is_a_warning() {
        let notice = Notice::for_error(&ApiError::Transport("connection refused".into()));

        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(!notice.text.contains("connection refused"));
    }
}
