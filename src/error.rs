use std::path::PathBuf;
use thiserror::Error;




/// Every way a grading run can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("{} does not exist. Exiting.", .0.display())]
    MissingFile(PathBuf),

    #[error("{url} returns error. Exiting.")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not write {}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid checks file", .path.display())]
    Checks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        selector: String,
        reason: String,
    },
}
