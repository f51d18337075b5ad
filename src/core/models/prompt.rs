/// How a prompt can be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Hidden text entry with confirm and cancel.
    SecureText,
    /// Yes/no question.
    ConfirmCancel,
    /// Notification with a single dismiss action.
    DismissOnly,
}

/// A modal question or notification: title, message and the action labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    pub style: PromptStyle,
    pub actions: Vec<String>,
}

/// The user's answer to a `Prompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Submitted(String),
    Confirmed,
    Cancelled,
    Dismissed,
}
