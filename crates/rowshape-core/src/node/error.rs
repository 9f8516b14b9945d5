use thiserror::Error as ThisError;

///
/// NodeError
///
/// Construction-time misuse of the schema model. These are programmer
/// errors and surface when the schema is built, never during decode.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NodeError {
    #[error("field at position {index} has an empty name")]
    EmptyFieldName { index: usize },

    #[error("duplicate field '{name}'")]
    DuplicateField { name: String },

    #[error("fields '{first}' and '{second}' share the storage key '{key}'")]
    DuplicateStorageKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("column is already annotated as {existing}")]
    ConflictingAnnotation { existing: &'static str },
}
