pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Resolves the chat completions endpoint for `base_url`.
///
/// A base that already ends in `/chat/completions` or `/chat` is completed, not
/// extended; a blank base falls back to [`DEFAULT_OPENAI_BASE_URL`].
pub fn normalize_chat_completions_url(base_url: &str) -> String {
    let base = match base_url.trim().trim_end_matches('/') {
        "" => DEFAULT_OPENAI_BASE_URL,
        base => base,
    };
    let root = base
        .strip_suffix("/chat/completions")
        .or_else(|| base.strip_suffix("/chat"))
        .unwrap_or(base);
    format!("{root}/chat/completions")
}
