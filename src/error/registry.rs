use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate serializer name: {0}")]
    DuplicateName(String),
}
