pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_COOKIE_FILE: &str = "cookie-file";
pub const ARG_INSECURE: &str = "insecure";

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Account password")
        .env("GATEHOUSE_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn profile_image_arg() -> Arg {
    Arg::new("profile-image")
        .long("profile-image")
        .help("Path to a profile image (png, jpg, gif, webp)")
        .value_parser(clap::value_parser!(std::path::PathBuf))
}

fn sessions() -> Command {
    Command::new("sessions")
        .about("List or terminate active sessions")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("Show active sessions across devices"))
        .subcommand(
            Command::new("revoke")
                .about("Terminate one session")
                .arg(Arg::new("id").help("Session id").required(true))
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Confirm termination without asking")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn profile() -> Command {
    Command::new("profile")
        .about("Edit your profile")
        .subcommand_required(true)
        .subcommand(
            Command::new("update")
                .about("Update username, email and/or profile image")
                .arg(Arg::new("email").long("email").help("New email address"))
                .arg(Arg::new("username").long("username").help("New username"))
                .arg(profile_image_arg()),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("gatehouse")
        .about("Authentication portal client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("GATEHOUSE_GIT_SHA"),
            ")"
        ))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Auth API base URL, example: https://auth.example.com/api")
                .env("GATEHOUSE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_COOKIE_FILE)
                .long("cookie-file")
                .help("File that keeps the session cookies between commands")
                .env("GATEHOUSE_COOKIE_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_INSECURE)
                .long("insecure")
                .help("Accept invalid TLS certificates (local development only)")
                .env("GATEHOUSE_INSECURE")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with your email or username")
                .arg(
                    Arg::new("identifier")
                        .short('i')
                        .long("identifier")
                        .help("Email or username")
                        .required(true),
                )
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new("email").long("email").help("Email address").required(true))
                .arg(
                    Arg::new("username")
                        .long("username")
                        .help("Username")
                        .required(true),
                )
                .arg(password_arg())
                .arg(profile_image_arg()),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the session"))
        .subcommand(
            Command::new("dashboard")
                .visible_alias("me")
                .about("Show your profile"),
        )
        .subcommand(Command::new("refresh").about("Rotate the session tokens"))
        .subcommand(sessions())
        .subcommand(profile());

    logging::with_args(command)
}
