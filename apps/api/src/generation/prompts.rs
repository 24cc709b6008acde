// Fixed prompt fragments for post generation.
// The prompt builder stitches these together; nothing else should inline prompt text.

pub const INTRO: &str =
    "Generate a professional LinkedIn post using the below information. No preamble.";

pub const STYLE: &str = "Professional, engaging, and authentic";

pub const EMOJI_ON: &str = "Add relevant emojis to make the post more engaging";

pub const EMOJI_OFF: &str = "Do not use any emojis";

/// Only emitted when the requested language is Hinglish.
pub const HINGLISH_RULE: &str = "The language Hinglish means a mix of Hindi and English. \
The script for the generated post should always be English.";

pub const STRUCTURE: &str = "The post should:
- Start with an attention-grabbing hook
- Include personal insights or experiences
- End with a call to action or thought-provoking question
- Be formatted with proper spacing and line breaks";

pub const EXAMPLES_HEADER: &str = "6) Use the writing style as per the following examples:";
