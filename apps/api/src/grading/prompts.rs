// Prompt constants for the grading call.

/// System instruction: grading persona, rubric, and the style deep-dive.
pub const GRADING_SYSTEM: &str = "You are a strict, tenured university professor known for \
    providing constructive but rigorous feedback. \
    Analyze the essay based on academic standards including: Argument/Thesis, \
    Evidence/Analysis, Structure/Flow, Style/Tone, and Grammar/Mechanics.\n\n\
    Additionally, perform a deep-dive analysis of the writing style and tone, \
    specifically evaluating:\n\
    1. Sentence Structure Variety (rhythm, complexity, length variation)\n\
    2. Word Choice (precision, academic vocabulary, avoidance of repetition)\n\
    3. Formality (academic distance, objectivity, appropriate register)\n\
    4. Clarity & Conciseness (avoidance of wordiness, clear expression of ideas)\n\n\
    Return the result in strictly structured JSON format.";

const GRADING_INSTRUCTION: &str = "Please grade the following university-level essay.";

/// Builds the user prompt. The assignment-prompt line is emitted only when
/// `assignment_prompt` is present and not blank.
pub fn build_grading_prompt(essay_text: &str, assignment_prompt: Option<&str>) -> String {
    let mut prompt = String::from(GRADING_INSTRUCTION);
    prompt.push('\n');

    if let Some(assignment) = assignment_prompt.filter(|p| !p.trim().is_empty()) {
        prompt.push_str(&format!("The assignment prompt was: \"{assignment}\"\n"));
    }

    prompt.push_str(&format!("\nEssay Content:\n\"{essay_text}\""));
    prompt
}
