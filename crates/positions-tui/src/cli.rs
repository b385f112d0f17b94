//! Single-command modes: sign in, sign out, or show who is signed in,
//! without opening the terminal interface.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::warn;

use positions_core::controllers::{AuthFlow, AuthForm};
use positions_core::{ApiClient, Config, TokenStore};

const USAGE: &str = "\
Usage: positions [OPTION]

With no option, opens the terminal interface.

Options:
  --login     Sign in from the command line and store the token
  --logout    Remove the stored token
  --whoami    Show the signed-in user
  -h, --help  Show this help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Interactive,
    Login,
    Logout,
    WhoAmI,
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Interactive),
        [flag] => match flag.as_str() {
            "--login" => Ok(Command::Login),
            "--logout" => Ok(Command::Logout),
            "--whoami" => Ok(Command::WhoAmI),
            "-h" | "--help" => Ok(Command::Help),
            other => bail!("Unknown option: {}\n\n{}", other, USAGE),
        },
        _ => bail!("Too many arguments\n\n{}", USAGE),
    }
}

pub async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Interactive => Ok(()),
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Login => login(config).await,
        Command::Logout => {
            let store = config.open_token_store()?;
            store.clear().context("Failed to clear stored credential")?;
            println!("Logged out");
            Ok(())
        }
        Command::WhoAmI => {
            let store = config.open_token_store()?;
            match store.read() {
                Some(credential) => {
                    println!("{}", credential.display_name_or_default());
                    Ok(())
                }
                None => bail!("Not logged in"),
            }
        }
    }
}

async fn login(mut config: Config) -> Result<()> {
    let store = config
        .open_token_store()
        .context("Failed to open token store")?;
    let api = ApiClient::new(config.api_base(), store.clone())
        .context("Failed to create API client")?;

    let username = prompt_username(config.last_username.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    let mut form = AuthForm::new(AuthFlow::Login).with_username(username);
    form.password = password;

    if form.submit(&api, store.as_ref()).await.is_none() {
        let field_errors = form.field_errors();
        let message = form
            .error()
            .or(field_errors.username.as_deref())
            .or(field_errors.password.as_deref())
            .unwrap_or(AuthFlow::Login.fallback_message());
        bail!("{}", message);
    }

    config.last_username = Some(form.username.clone());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
    println!("Logged in as {}", form.username);
    Ok(())
}

/// Read a username from stdin, offering the last one used as the default
fn prompt_username(default: Option<&str>) -> Result<String> {
    match default {
        Some(name) => print!("Username [{}]: ", name),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let entered = line.trim();

    Ok(match (entered.is_empty(), default) {
        (true, Some(name)) => name.to_string(),
        _ => entered.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args_is_interactive() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Interactive);
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse_args(&args(&["--login"])).unwrap(), Command::Login);
        assert_eq!(parse_args(&args(&["--logout"])).unwrap(), Command::Logout);
        assert_eq!(parse_args(&args(&["--whoami"])).unwrap(), Command::WhoAmI);
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_args(&args(&["--dump"])).is_err());
        assert!(parse_args(&args(&["--login", "--logout"])).is_err());
    }
}
