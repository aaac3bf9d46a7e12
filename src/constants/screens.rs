pub const STUDY_TITLE: &str = "Tone-controlled Video Captioning";

pub const GENDER_OPTIONS: [&str; 3] = ["Male", "Female", "Other / Prefer not to say"];
pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 60;

pub const CONSENT_TEXT: &str = "I am over 18 and agree to participate in this study. I understand my responses will be recorded anonymously.";

pub const MISSING_FIELDS: &str = "Please fill in all fields to continue.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const INVALID_AGE: &str = "Please select an age between 18 and 60.";
pub const INVALID_GENDER: &str = "Please select one of the listed gender options.";
pub const MISSING_CONSENT: &str = "Please confirm that you agree to participate.";
pub const MISSING_SELECTION: &str = "Please select an answer.";
pub const MISSING_OPTION: &str = "Please select an option.";
pub const NEEDS_TWO_OPTIONS: &str = "Please select exactly 2 options.";
pub const SAVE_FAILED: &str = "Failed to save response. Please check your connection and try again.";

pub const TONE_TITLE: &str = "Tone and Writing Style";
pub const TONE_BODY: [&str; 2] = [
    "Tone refers to the author's attitude or feeling about a subject, reflecting their emotional character (e.g., Sarcastic, Angry, Caring).",
    "Writing Style refers to the author's technique or method of writing (e.g., Advisory, Factual, Conversational).",
];
pub const FACTUAL_TITLE: &str = "How to measure a caption's Factual Accuracy?";
pub const EXAMPLE_VIDEO: &str = "media/v_1772082398257127647_PAjmPcDqmPNuvb6p.mp4";
pub const TONE_IMAGE: &str = "media/tone_meaning.jpg";
pub const FACTUAL_IMAGE: &str = "media/factual_info_new.jpg";

pub const COMPREHENSION_PROMPT: &str = "Describe what is happening in the video";
pub const THANK_YOU_TITLE: &str = "Study Complete! Thank You!";
pub const THANK_YOU_BODY: &str = "You have successfully completed all parts of the study. We sincerely appreciate your time and valuable contribution to our research!";

/// Part 1 question ids, in the order they are revealed.
pub const PART1_QUESTION_IDS: [&str; 5] = [
    "tone_relevance",
    "style_relevance",
    "factual_consistency",
    "usefulness",
    "human_likeness",
];

pub const STRENGTH_SCALE: [&str; 5] = ["Not at all", "Weak", "Moderate", "Strong", "Very Strong"];
pub const ACCURACY_SCALE: [&str; 5] = [
    "Contradicts",
    "Inaccurate",
    "Partially",
    "Mostly Accurate",
    "Accurate",
];
pub const USEFULNESS_SCALE: [&str; 5] = ["Not at all", "Slightly", "Moderately", "Very", "Extremely"];
pub const HUMAN_LIKENESS_SCALE: [&str; 5] = [
    "Robotic",
    "Unnatural",
    "Moderate",
    "Very Human-like",
    "Natural",
];

pub const DEFAULT_TONE_TEXT: &str = "How {} does the caption sound?";
pub const DEFAULT_STYLE_TEXT: &str = "How {} is the caption's style?";
pub const DEFAULT_FACTUAL_TEXT: &str = "How factually accurate is the caption?";
pub const DEFAULT_USEFULNESS_TEXT: &str = "How useful is this caption for {}?";
pub const DEFAULT_HUMAN_TEXT: &str = "How human-like does this caption sound?";
pub const DEFAULT_APPLICATION: &str = "the intended application";

pub const PART2_OPTIONS: [&str; 4] = [
    "Caption A",
    "Caption B",
    "Both Equal / Neither",
    "Cannot Determine",
];
pub const DEFAULT_PART2_STYLE_TEXT: &str = "Which caption's style is more {}?";

pub const YES_NO: [&str; 2] = ["Yes", "No"];
pub const PART3_FACTUAL_TEXT: &str = "Is the core factual content consistent across both captions?";
pub const PART3_MISSING_TEMPLATE: &str = "Q template missing for {}";

pub fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}
