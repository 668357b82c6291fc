use clap::Parser;
use snafu::ResultExt;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{PipelineSnafu, Result},
    invocation::InvocationArgs,
};

#[derive(Parser)]
pub struct SnapshotArgs {
    #[clap(flatten)]
    invocation: InvocationArgs,
}

impl SnapshotArgs {
    pub async fn run(self, _ct: CancellationToken) -> Result<()> {
        let event = self.invocation.object_event()?;
        let pipeline = self.invocation.pipeline()?;

        let token = pipeline.run_snapshot(&event).await.context(PipelineSnafu)?;
        println!("{token}");

        Ok(())
    }
}
