use std::path::PathBuf;

use thiserror::Error;

use super::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader library `{}` could not be read", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader library `{library}`: unterminated block comment starting on line {line}")]
    UnterminatedComment { library: String, line: usize },

    #[error("shader library `{library}` has no {stage} entry point named `{name}`")]
    MissingEntryPoint {
        library: String,
        stage: ShaderStage,
        name: String,
    },
}
