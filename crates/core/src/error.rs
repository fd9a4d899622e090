#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A stored JSON document could not be decoded into the expected shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}
