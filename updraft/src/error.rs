use snafu::Snafu;

/// CLI error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CliError {
    #[snafu(display("Invalid {name} argument: {message}"))]
    InvalidArgument { name: &'static str, message: String },
    #[snafu(display("Failed to read event document"))]
    Io { source: std::io::Error },
    #[snafu(display("Invalid event document"))]
    Event { source: updraft_pipeline::EventError },
    #[snafu(display("Invalid configuration"))]
    Config { source: updraft_pipeline::ConfigError },
    #[snafu(display("Failed to open local object store"))]
    Store { source: object_store::Error },
    #[snafu(display("Pipeline invocation failed"))]
    Pipeline {
        source: updraft_pipeline::PipelineError,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
