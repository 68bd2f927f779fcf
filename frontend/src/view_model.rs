use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a valid identifier: {0:?}")]
pub struct ParseIdError(pub String);

#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserId(pub u64);

fn parse_id(raw: &str) -> Result<u64, ParseIdError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_err| ParseIdError(raw.to_owned()))
}

impl FromStr for MessageId {
    type Err = ParseIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_id(raw).map(MessageId)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_id(raw).map(UserId)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the viewer currently likes a message, as confirmed by the server.
#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    NotLiked,
}

impl LikeState {
    pub fn toggled(self) -> Self {
        match self {
            LikeState::Liked => LikeState::NotLiked,
            LikeState::NotLiked => LikeState::Liked,
        }
    }

    /// Class carried by the like form while in this state.
    pub fn form_class(self) -> &'static str {
        match self {
            LikeState::Liked => "liked",
            LikeState::NotLiked => "not-liked",
        }
    }

    pub fn icon(self) -> IconStyle {
        match self {
            LikeState::Liked => IconStyle::Filled,
            LikeState::NotLiked => IconStyle::Outline,
        }
    }

    /// Reads the state off a form's class list. `liked` wins if a broken
    /// template puts both classes on one form.
    pub fn from_form_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut found = None;

        for class in classes {
            match class {
                "liked" => return Some(LikeState::Liked),
                "not-liked" => found = Some(LikeState::NotLiked),
                _ => {}
            }
        }

        found
    }
}

#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum IconStyle {
    Filled,
    Outline,
}

impl IconStyle {
    pub fn class(self) -> &'static str {
        match self {
            IconStyle::Filled => "fas",
            IconStyle::Outline => "far",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeControl {
    pub message_id: MessageId,
    pub state: LikeState,
}

/// The timeline a view list belongs to.
#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListContext {
    Home,
    User(UserId),
}

impl ListContext {
    /// `id` attribute of the container element holding this list.
    pub fn container_id(&self) -> String {
        match self {
            ListContext::Home => "home".to_owned(),
            ListContext::User(user_id) => format!("user-{}", user_id),
        }
    }

    pub fn from_container_id(id: &str) -> Option<Self> {
        if id == "home" {
            return Some(ListContext::Home);
        }

        id.strip_prefix("user-")
            .and_then(|raw| raw.parse::<UserId>().ok())
            .map(ListContext::User)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("rendered fragment is empty")]
    Empty,
}

/// Server-rendered markup for a single message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedFragment(String);

impl RenderedFragment {
    pub fn new(markup: impl Into<String>) -> Result<Self, FragmentError> {
        let markup = markup.into();

        if markup.trim().is_empty() {
            return Err(FragmentError::Empty);
        }

        Ok(RenderedFragment(markup))
    }

    pub fn markup(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewList {
    pub context: ListContext,
    /// Most recent first.
    pub entries: Vec<RenderedFragment>,
}

impl ViewList {
    pub fn new(context: ListContext) -> Self {
        ViewList {
            context,
            entries: Vec::new(),
        }
    }

    pub fn prepend(&mut self, fragment: RenderedFragment) {
        self.entries.insert(0, fragment);
    }
}

/// A change the rendering layer has to reflect on the page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViewChange {
    LikeStateChanged {
        message_id: MessageId,
        state: LikeState,
    },
    FragmentPrepended {
        context: ListContext,
        fragment: RenderedFragment,
    },
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PageModel {
    viewer: Option<UserId>,
    like_controls: HashMap<MessageId, LikeControl>,
    /// Server-confirmed states not yet shown on the page.
    confirmed: HashMap<MessageId, LikeState>,
    lists: Vec<ViewList>,
}

impl PageModel {
    pub fn new(viewer: Option<UserId>) -> Self {
        PageModel {
            viewer,
            ..PageModel::default()
        }
    }

    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    pub fn register_like_control(&mut self, control: LikeControl) {
        self.like_controls.insert(control.message_id, control);
    }

    /// Adds a list, replacing any list already registered for the context.
    pub fn register_list(&mut self, list: ViewList) {
        match self.lists.iter_mut().find(|l| l.context == list.context) {
            Some(existing) => *existing = list,
            None => self.lists.push(list),
        }
    }

    pub fn like_state(&self, message_id: MessageId) -> Option<LikeState> {
        self.like_controls.get(&message_id).map(|c| c.state)
    }

    /// Latest state the server is known to hold: a confirmation still waiting
    /// to be shown, else the displayed state.
    pub fn confirmed_like_state(&self, message_id: MessageId) -> Option<LikeState> {
        self.confirmed
            .get(&message_id)
            .copied()
            .or_else(|| self.like_state(message_id))
    }

    /// Records a server-confirmed state without changing what is displayed.
    pub fn confirm_like_state(&mut self, message_id: MessageId, state: LikeState) {
        if self.like_controls.contains_key(&message_id) {
            self.confirmed.insert(message_id, state);
        }
    }

    /// Displays the pending confirmation for a control, if there is one.
    pub fn settle_like_state(&mut self, message_id: MessageId) -> Option<ViewChange> {
        let state = self.confirmed.remove(&message_id)?;
        self.set_like_state(message_id, state)
    }

    pub fn list(&self, context: ListContext) -> Option<&ViewList> {
        self.lists.iter().find(|l| l.context == context)
    }

    pub fn lists(&self) -> &[ViewList] {
        &self.lists
    }

    /// Returns the change to render, or `None` when the control is unknown
    /// or already in `state`.
    pub fn set_like_state(&mut self, message_id: MessageId, state: LikeState) -> Option<ViewChange> {
        self.confirmed.remove(&message_id);
        let control = self.like_controls.get_mut(&message_id)?;

        if control.state == state {
            return None;
        }
        control.state = state;

        Some(ViewChange::LikeStateChanged { message_id, state })
    }

    /// Lists on this page that a message composed by the viewer belongs in:
    /// home, then the viewer's own timeline. Other users' lists never qualify.
    pub fn compose_targets(&self) -> Vec<ListContext> {
        let mut targets = Vec::new();

        if self.list(ListContext::Home).is_some() {
            targets.push(ListContext::Home);
        }

        if let Some(viewer) = self.viewer {
            let own = ListContext::User(viewer);
            if self.list(own).is_some() {
                targets.push(own);
            }
        }

        targets
    }

    pub fn prepend_fragment(&mut self, fragment: RenderedFragment) -> Vec<ViewChange> {
        let targets = self.compose_targets();
        let mut changes = Vec::with_capacity(targets.len());

        for context in targets {
            if let Some(list) = self.lists.iter_mut().find(|l| l.context == context) {
                list.prepend(fragment.clone());
                changes.push(ViewChange::FragmentPrepended {
                    context,
                    fragment: fragment.clone(),
                });
            }
        }

        changes
    }
}
