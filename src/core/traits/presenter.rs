use crate::core::models::prompt::{Prompt, PromptResponse};

/// Port for modal prompts.
///
/// `present` returns once the user has answered; the flow that asked
/// is suspended until then.
pub trait Presenter {
    fn present(&mut self, prompt: &Prompt) -> PromptResponse;
}
