use clap::Parser;

/// Arguments for the plan command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the pipeline:\n    deploy-bootstrap plan\n\n\
                  Machine-readable output:\n    deploy-bootstrap plan --json")]
pub struct PlanArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Stages to leave out
    #[arg(long, value_name = "STAGE", num_args = 1.., value_delimiter = ',')]
    pub skip: Vec<String>,
}
