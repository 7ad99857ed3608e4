/// The system prompt sent with every agent run.
///
/// It pins the model to the exact line-oriented reply format the response
/// parser understands: labeled header lines, a dash-bulleted ingredient
/// list, and a numbered instruction list.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const SYSTEM_PROMPT: &str = include_str!("prompt.txt");
