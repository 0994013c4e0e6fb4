use scriptkit::defaults::Defaults;

pub type CmdResult<T> = scriptkit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub defaults: Defaults,
}

pub mod add_extension;
pub mod archive;
pub mod hash;
pub mod render;

pub(crate) fn run_raw(
    command: crate::Commands,
    global: &GlobalArgs,
) -> scriptkit::Result<(String, i32)> {
    match command {
        crate::Commands::Render(args) => render::run_raw(args, global),
        _ => Err(scriptkit::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (scriptkit::Result<serde_json::Value>, i32) {
    crate::tty::status("scriptkit is working...");

    match command {
        crate::Commands::AddExtension(args) => dispatch!(args, global, add_extension),
        crate::Commands::Hash(args) => dispatch!(args, global, hash),
        crate::Commands::Archive(args) => dispatch!(args, global, archive),

        // Special case: Render uses raw output mode
        crate::Commands::Render(_) => {
            let err = scriptkit::Error::validation_invalid_argument(
                "output_mode",
                "Render command uses raw output mode",
                None,
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
