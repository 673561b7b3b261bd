use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("failed to parse dice expression `{0}`")]
    Parse(String),

    #[error("cannot build a distribution from an empty outcome list")]
    EmptyOutcomes,
}
