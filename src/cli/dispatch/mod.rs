//! Maps validated CLI matches to an action plus the shared settings.

use crate::cli::{
    actions::{Action, SessionsAction},
    commands::{ARG_API_URL, ARG_COOKIE_FILE, ARG_INSECURE},
    globals::GlobalArgs,
};
use crate::shared::RuntimeConfig;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Builds the shared settings from global arguments.
#[must_use]
pub fn globals(matches: &clap::ArgMatches) -> GlobalArgs {
    GlobalArgs::new(RuntimeConfig {
        api_base_url: matches.get_one::<String>(ARG_API_URL).cloned(),
        cookie_file: matches.get_one::<String>(ARG_COOKIE_FILE).cloned(),
        accept_invalid_certs: Some(matches.get_flag(ARG_INSECURE)),
    })
}

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn password(matches: &clap::ArgMatches) -> Result<SecretString> {
    required(matches, "password").map(SecretString::from)
}

fn image(matches: &clap::ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("profile-image").cloned()
}

/// Map the chosen subcommand to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub_m)) => Ok(Action::Login {
            identifier: required(sub_m, "identifier")?,
            password: password(sub_m)?,
        }),
        Some(("register", sub_m)) => Ok(Action::Register {
            email: required(sub_m, "email")?,
            username: required(sub_m, "username")?,
            password: password(sub_m)?,
            profile_image: image(sub_m),
        }),
        Some(("logout", _)) => Ok(Action::Logout),
        Some(("dashboard", _)) => Ok(Action::Dashboard),
        Some(("refresh", _)) => Ok(Action::Refresh),
        Some(("sessions", sub_m)) => match sub_m.subcommand() {
            Some(("list", _)) => Ok(Action::Sessions(SessionsAction::List)),
            Some(("revoke", revoke_m)) => Ok(Action::Sessions(SessionsAction::Revoke {
                id: required(revoke_m, "id")?,
                confirmed: revoke_m.get_flag("yes"),
            })),
            _ => Err(anyhow!("unknown sessions command")),
        },
        Some(("profile", sub_m)) => match sub_m.subcommand() {
            Some(("update", update_m)) => Ok(Action::UpdateProfile {
                email: update_m.get_one::<String>("email").cloned(),
                username: update_m.get_one::<String>("username").cloned(),
                profile_image: image(update_m),
            }),
            _ => Err(anyhow!("unknown profile command")),
        },
        _ => Err(anyhow!("unknown command")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn login_maps_to_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "gatehouse",
            "login",
            "-i",
            "alice",
            "--password",
            "correct",
        ]);
        let Action::Login {
            identifier,
            password,
        } = handler(&matches)?
        else {
            return Err(anyhow!("expected login"));
        };
        assert_eq!(identifier, "alice");
        assert_eq!(password.expose_secret(), "correct");
        Ok(())
    }

    #[test]
    fn revoke_defaults_to_unconfirmed() -> Result<()> {
        let matches =
            commands::new().get_matches_from(vec!["gatehouse", "sessions", "revoke", "s9"]);
        let action = handler(&matches)?;
        assert!(matches!(
            action,
            Action::Sessions(SessionsAction::Revoke { ref id, confirmed: false }) if id == "s9"
        ));
        Ok(())
    }

    #[test]
    fn profile_update_keeps_only_given_fields() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "gatehouse",
            "profile",
            "update",
            "--username",
            "alice2",
        ]);
        let action = handler(&matches)?;
        assert!(matches!(
            action,
            Action::UpdateProfile { email: None, username: Some(ref name), profile_image: None } if name == "alice2"
        ));
        Ok(())
    }

    #[test]
    fn globals_fold_into_config() {
        temp_env::with_vars(
            [
                ("GATEHOUSE_API_URL", None::<&str>),
                ("GATEHOUSE_COOKIE_FILE", None::<&str>),
                ("GATEHOUSE_INSECURE", None::<&str>),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "gatehouse",
                    "--api-url",
                    " http://localhost:5000/api ",
                    "--insecure",
                    "logout",
                ]);
                let globals = globals(&matches);
                assert_eq!(globals.config.api_base_url, "http://localhost:5000/api");
                assert!(globals.config.accept_invalid_certs);
            },
        );
    }
}
