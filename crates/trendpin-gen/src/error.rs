use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chat response contained no message content")]
    MissingContent,

    #[error("product generation failed after {attempts} attempts: {last_error}\nlast raw response:\n{raw_text}")]
    Exhausted {
        attempts: u32,
        last_error: String,
        raw_text: String,
    },

    #[error("pin content was not usable JSON ({reason}):\n{raw_text}")]
    MalformedPin { reason: String, raw_text: String },
}
