/// Number of conversation lines kept per user
pub const HISTORY_WINDOW: usize = 10;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

pub const HISTORY_HEADER: &str = "Conversation history:";
pub const ASSISTANT_CUE: &str = "Assistant:";

pub const CODE_HELP_INSTRUCTIONS: &str = "Provide a helpful response with code examples. \
Format code properly with syntax highlighting. If providing a solution, explain how the code \
works step by step. If the user is asking about best practices, include modern approaches used \
in professional development.";

// Embed colors
pub const COLOR_SUCCESS: u32 = 0x00ff00;
pub const COLOR_RESPONSE: u32 = 0x3498db;
pub const COLOR_WARNING: u32 = 0xffff00;
pub const COLOR_ERROR: u32 = 0xff0000;

/// Discord rejects embed descriptions longer than this
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Length of the prompt preview shown by `/personality list`
pub const PERSONALITY_PREVIEW_LEN: usize = 100;
