use anyhow::{Result, bail};

use crate::config::Config;
use crate::runner::{RunOutput, RunRequest, Runner, stream_to_console};

use super::args::AskArgs;

pub(crate) async fn handle_ask(args: AskArgs, config: &Config, runner: &Runner) -> Result<()> {
    let prompt = args.prompt.join(" ").trim().to_owned();
    if prompt.is_empty() {
        bail!("Prompt cannot be empty");
    }

    let model = args.model.unwrap_or_else(|| config.models.chat.clone());
    let request = RunRequest::new(prompt, model)
        .with_mcp_servers(args.mcp_servers)
        .streaming(args.stream);

    match runner.execute(request).await? {
        RunOutput::Complete(result) => println!("{}", result.final_output),
        RunOutput::Stream(stream) => {
            stream_to_console(stream).await?;
        }
    }

    Ok(())
}
