// Protocol mappers
// Only the Gemini-to-Gemini request normalizer lives here for now.

pub mod gemini;
