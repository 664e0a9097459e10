use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install bash completions on a deployment host:\n    \
                  deploy-bootstrap completions bash > /etc/bash_completion.d/deploy-bootstrap\n\n\
                  Load into the current zsh session before a manual deploy:\n    \
                  source <(deploy-bootstrap completions zsh)\n\n\
                  PowerShell on a Windows build agent:\n    \
                  deploy-bootstrap completions pwsh | Out-String | Invoke-Expression")]
pub struct CompletionsArgs {
    /// Shell to generate for: bash, elvish, fish, powershell (pwsh) or zsh
    pub shell: String,
}
