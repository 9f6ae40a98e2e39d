// Essay grading: prompt, response schema, validation, and the grader seam.
// All model calls go through llm_client.

pub mod grader;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod validation;
