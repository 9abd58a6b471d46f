// Optimization pipeline: prompt composition, attachment encoding, the single
// model call, and delimiter-based response splitting.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod encoder;
pub mod handlers;
pub mod prompts;
pub mod splitter;
