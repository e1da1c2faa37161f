use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    preflight completions bash > ~/.bash_completion.d/preflight\n\n\
                  Generate zsh completions:\n    preflight completions zsh > ~/.zfunc/_preflight\n\n\
                  Generate fish completions:\n    preflight completions fish > ~/.config/fish/completions/preflight.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
