//! Argument normalization utilities.
//!
//! Transforms CLI arguments before clap parsing so one command definition can
//! accept the flag convention of the host platform: `-f` / `--file` everywhere
//! except Windows, where the same flags are spelled `/f` / `/file`.

use clap::error::ErrorKind;
use clap::{ArgMatches, Command};

use crate::error::{Error, Result};
use crate::platform::{detect_platform, Platform, PlatformProbe};

/// A clap command paired with the flag-prefix convention of a platform.
#[derive(Debug, Clone)]
pub struct PlatformParser {
    platform: Platform,
    command: Command,
}

impl PlatformParser {
    pub fn new(mut command: Command, platform: Platform) -> Self {
        command.build();
        Self { platform, command }
    }

    pub fn detect<P: PlatformProbe + ?Sized>(command: Command, probe: &P) -> Self {
        Self::new(command, detect_platform(probe))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Characters that introduce a flag under the active convention.
    pub fn prefix_chars(&self) -> &'static str {
        match self.platform {
            Platform::Windows => "/",
            Platform::NonWindows => "-",
        }
    }

    /// Rewrite `args` (including the binary name) into clap's dash syntax.
    ///
    /// On Windows, `/x` maps to the short flag `-x`, `/name` to `--name`, and
    /// `/name:value` or `/name=value` to `--name=value`. Slash tokens that name no
    /// known flag are left alone so absolute paths still work as positionals.
    /// Dash-prefixed flags are rejected with `validation.argument_syntax`.
    pub fn normalize(&self, args: Vec<String>) -> Result<Vec<String>> {
        if !self.platform.is_windows() {
            return Ok(args);
        }

        let mut iter = args.into_iter();
        let mut result = Vec::new();
        if let Some(bin) = iter.next() {
            result.push(bin);
        }

        let mut current = &self.command;
        let mut expects_value = false;

        for arg in iter {
            if expects_value {
                expects_value = false;
                // Joined so clap never reads a dash-leading value as a flag.
                if let Some(flag) = result.pop() {
                    result.push(format!("{}={}", flag, arg));
                }
                continue;
            }

            if let Some(rest) = arg.strip_prefix('/') {
                if rest == "?" {
                    result.push("--help".to_string());
                    continue;
                }

                let (name, inline_value) = split_inline_value(rest);
                match lookup_flag(current, name) {
                    Some((flag, takes_value)) => match inline_value {
                        Some(value) => result.push(format!("{}={}", flag, value)),
                        None => {
                            expects_value = takes_value;
                            result.push(flag);
                        }
                    },
                    None => result.push(arg),
                }
                continue;
            }

            if is_dash_flag(&arg) {
                return Err(Error::argument_syntax(arg, self.prefix_chars()));
            }

            if let Some(sub) = current.find_subcommand(&arg) {
                current = sub;
            }
            result.push(arg);
        }

        Ok(result)
    }

    /// Normalize `args` and hand them to clap.
    ///
    /// Every failure comes back as a clap error bound to the command, so
    /// `err.exit()` prints usage and exits with clap's status.
    pub fn try_get_matches_from<I, T>(&self, args: I) -> std::result::Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let normalized = self
            .normalize(args)
            .map_err(|err| self.command.clone().error(ErrorKind::UnknownArgument, err.message))?;
        self.command.clone().try_get_matches_from(normalized)
    }
}

fn split_inline_value(rest: &str) -> (&str, Option<&str>) {
    match rest.find(['=', ':']) {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    }
}

/// Resolve a slash-spelled flag name against `command`, returning the dash
/// spelling and whether the flag consumes a value.
fn lookup_flag(command: &Command, name: &str) -> Option<(String, bool)> {
    if name.is_empty() {
        return None;
    }

    let mut chars = name.chars();
    if let (Some(short), None) = (chars.next(), chars.next()) {
        let found = command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .find(|arg| {
                arg.get_short_and_visible_aliases()
                    .is_some_and(|shorts| shorts.contains(&short))
            });
        if let Some(arg) = found {
            return Some((format!("-{}", short), arg.get_action().takes_values()));
        }
    }

    command
        .get_arguments()
        .filter(|arg| !arg.is_positional())
        .find(|arg| {
            arg.get_long_and_visible_aliases()
                .is_some_and(|longs| longs.contains(&name))
        })
        .map(|arg| (format!("--{}", name), arg.get_action().takes_values()))
}

fn is_dash_flag(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some("") | None => false,
        Some(rest) => !is_numeric_literal(rest),
    }
}

/// Digits with an optional fraction or exponent. `inf` and `nan` do not count.
fn is_numeric_literal(text: &str) -> bool {
    match text.chars().next() {
        Some(first) if first.is_ascii_digit() || first == '.' => {
            text.chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
                && text.parse::<f64>().is_ok()
        }
        _ => false,
    }
}
