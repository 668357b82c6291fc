use snafu::Snafu;
use updraft_timeseries::{
    CommonAttributes, DatabaseName, Dimension, TableName, TimeUnit, WriteTarget,
};

pub const ENV_DATABASE: &str = "UPDRAFT_DATABASE";
pub const ENV_TABLE: &str = "UPDRAFT_TABLE";
pub const ENV_INSTANCE_ID: &str = "UPDRAFT_INSTANCE_ID";
pub const ENV_DELETE_ON_SUCCESS: &str = "UPDRAFT_DELETE_ON_SUCCESS";

/// Per-invocation configuration, read once before the pipeline starts.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Destination database.
    pub database: DatabaseName,
    /// Destination table.
    pub table: TableName,
    /// Identifier of this pipeline instance, written as a dimension on every
    /// record so downstream queries can tell instances apart.
    pub instance_id: String,
    /// Remove the source object after a fully successful write.
    pub delete_on_success: bool,
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("missing required environment variable {name}"))]
    MissingVariable { name: &'static str },
}

impl PipelineConfig {
    /// Read the configuration from the hosting environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseName::new(require(ENV_DATABASE)?),
            table: TableName::new(require(ENV_TABLE)?),
            instance_id: require(ENV_INSTANCE_ID)?,
            delete_on_success: parse_flag(std::env::var(ENV_DELETE_ON_SUCCESS).ok().as_deref()),
        })
    }

    pub fn write_target(&self) -> WriteTarget {
        WriteTarget {
            database: self.database.clone(),
            table: self.table.clone(),
        }
    }

    /// Attributes shared by every record this invocation writes: timestamps
    /// are epoch milliseconds, and a `context` dimension names the instance.
    pub fn common_attributes(&self) -> CommonAttributes {
        CommonAttributes {
            time_unit: TimeUnit::Milliseconds,
            dimensions: vec![Dimension {
                name: "context".to_string(),
                value: self.instance_id.clone(),
            }],
        }
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVariable { name })
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}
