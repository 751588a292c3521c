use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Missing value for parameter : {name}"))]
    MissingParameter { name: String },

    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Failed to copy '{file}' from '{folder}' to '{target}': {source}"))]
    CopyFailed {
        folder: String,
        file: String,
        target: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to move '{file}' from '{folder}' to '{target}': {source}"))]
    MoveFailed {
        folder: String,
        file: String,
        target: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to delete '{file}' from '{folder}': {source}"))]
    DeleteFailed {
        folder: String,
        file: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to check '{file}' in '{folder}': {source}"))]
    ExistsFailed {
        folder: String,
        file: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to bind listener on {addr}: {source}"))]
    ServerBind {
        addr: String,
        source: std::io::Error,
    },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
