//! # Shell Completion Module
//!
//! Generation of completion scripts for the shells clap_complete supports.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! tagmine completion bash > ~/.local/share/bash-completion/completions/tagmine
//!
//! # Generate zsh completions
//! tagmine completion zsh > ~/.config/zsh/completions/_tagmine
//! ```

use crate::cli;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Map our CLI shell enum onto clap_complete's
#[must_use]
pub fn shell_to_completion_shell(shell: &cli::Shell) -> CompletionShell {
    match shell {
        cli::Shell::Bash => CompletionShell::Bash,
        cli::Shell::Zsh => CompletionShell::Zsh,
        cli::Shell::Fish => CompletionShell::Fish,
        cli::Shell::PowerShell => CompletionShell::PowerShell,
        cli::Shell::Elvish => CompletionShell::Elvish,
    }
}
