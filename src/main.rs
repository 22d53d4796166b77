use anyhow::Context;
use clap::Parser;
use fumen_tools::app::inspect::inspect;
use fumen_tools::config::toml_config::FileConfig;
use fumen_tools::config::{Command, FileArgs};
use fumen_tools::core::Pipeline;
use fumen_tools::utils::{logger, validation::Validate};
use fumen_tools::{
    CliConfig, CombineCommentsPipeline, CombinePipeline, FirstPagesPipeline, FumenEngine,
    LabelsFilePipeline, LabelsPipeline, LoadOutcome, LocalStorage, OutputTarget, Result,
    ToolConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = FileConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;
    let config = ToolConfig::from(file_config)
        .with_viewer_url(cli.viewer_url.clone())
        .with_strict_write(cli.strict_write);

    match run(cli.command, config).await {
        Ok(Some(text)) => println!("{}", text),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("{} (Category: {:?})", e, e.category());
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

/// Returns the text to print on stdout, if any.
async fn run(command: Command, config: ToolConfig) -> Result<Option<String>> {
    let storage = LocalStorage::default();

    let outcome = match command {
        Command::Combine { codes, output } => {
            let config = validated(config.with_output(output))?;
            execute(CombinePipeline::new(storage, config, codes)).await?
        }
        Command::CombineComments(args) => {
            let (config, target) = file_settings(config, args)?;
            execute(CombineCommentsPipeline::new(storage, config).with_target(target)).await?
        }
        Command::Labels { codes, output } => {
            let config = validated(config.with_output(output))?;
            execute(LabelsPipeline::new(storage, config, codes)).await?
        }
        Command::LabelsFile(args) => {
            let (config, target) = file_settings(config, args)?;
            execute(LabelsFilePipeline::new(storage, config).with_target(target)).await?
        }
        Command::FirstPages(args) => {
            let (config, target) = file_settings(config, args)?;
            execute(FirstPagesPipeline::new(storage, config).with_target(target)).await?
        }
        Command::Inspect { code, json } => return inspect(&code, json).map(Some),
    };

    Ok(match outcome {
        LoadOutcome::Stdout(text) => Some(text),
        LoadOutcome::Written(_) | LoadOutcome::WriteFailed { .. } => None,
    })
}

async fn execute<P: Pipeline>(pipeline: P) -> Result<LoadOutcome> {
    FumenEngine::new(pipeline).run().await
}

fn validated(config: ToolConfig) -> Result<ToolConfig> {
    config.validate()?;
    Ok(config)
}

/// File-driven commands print to stdout unless `--output` names a file.
fn file_settings(config: ToolConfig, args: FileArgs) -> Result<(ToolConfig, OutputTarget)> {
    let target = args
        .output
        .clone()
        .map(OutputTarget::File)
        .unwrap_or(OutputTarget::Stdout);
    let config = validated(config.with_input(args.input).with_output(args.output))?;
    Ok((config, target))
}
