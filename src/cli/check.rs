use clap::Parser;

/// Arguments for the check command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Check the current project:\n    deploy-bootstrap check\n\n\
                  Require database credentials:\n    BOOTSTRAP_REQUIRE_ENV=DATABASE_URL deploy-bootstrap check")]
pub struct CheckArgs {
    /// Stages to leave out of the checks
    #[arg(long, value_name = "STAGE", num_args = 1.., value_delimiter = ',')]
    pub skip: Vec<String>,
}
