use std::io::{self, Write};

use clap::Args;

use scriptkit::io::{expand_path, read_file};
use scriptkit::template::{self, RenderOptions};

use super::GlobalArgs;

#[derive(Args)]
pub struct RenderArgs {
    /// Jinja template file
    pub template_file: String,

    /// YAML file with the template variables
    pub vars_file: String,

    /// Keep the newline that follows block tags
    #[arg(long)]
    pub no_trim_blocks: bool,
}

/// Stream the variables dump followed by the rendered template to stdout.
pub fn run_raw(args: RenderArgs, global: &GlobalArgs) -> scriptkit::Result<(String, i32)> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_render(&args, global, &mut handle)?;
    Ok((String::new(), 0))
}

/// The dump is written before the template is opened, so it survives a
/// template that is missing or fails to render.
fn write_render<W: Write>(
    args: &RenderArgs,
    global: &GlobalArgs,
    out: &mut W,
) -> scriptkit::Result<()> {
    let options = RenderOptions {
        trim_blocks: global.defaults.template.trim_blocks && !args.no_trim_blocks,
    };

    let variables = template::load_variables(&expand_path(&args.vars_file))?;
    emit(out, &template::dump_variables(&variables)?)?;

    let source = read_file(&expand_path(&args.template_file), "read template file")?;
    let output = template::render_template(&source, &variables, &options)?;
    emit(out, &output)?;
    emit(out, "\n")
}

fn emit<W: Write>(out: &mut W, text: &str) -> scriptkit::Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| scriptkit::Error::internal_io(e.to_string(), Some("write stdout".to_string())))
}
