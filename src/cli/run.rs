use clap::Parser;

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Run every stage:\n    deploy-bootstrap run\n\n\
                  Validate the environment first:\n    deploy-bootstrap run --preflight\n\n\
                  Skip the OS package stage:\n    deploy-bootstrap run --skip system-packages\n\n\
                  Print stage headers on stderr:\n    deploy-bootstrap run --announce")]
pub struct RunArgs {
    /// Run preflight checks before the first stage
    #[arg(long)]
    pub preflight: bool,

    /// Announce each stage on stderr
    #[arg(long)]
    pub announce: bool,

    /// Stages to leave out (dependencies, system-packages, static-assets, migrations, or an extra stage)
    #[arg(long, value_name = "STAGE", num_args = 1.., value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}
