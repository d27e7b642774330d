//! Sampling parameters sent with every generation request

/// Generation parameters (Value Object)
///
/// Fixed at build time; the user cannot change them at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
}

impl GenerationParams {
    pub const CHAT: GenerationParams = GenerationParams {
        temperature: 0.7,
        top_p: 0.9,
        top_k: 40,
    };
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::CHAT
    }
}
