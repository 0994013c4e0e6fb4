use clap::Args;

use scriptkit::extension_fix::{self, FixReport};
use scriptkit::io::expand_path;
use scriptkit::mime_sniff::ContentSniffer;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct AddExtensionArgs {
    /// File without an extension; its content decides the new one
    pub path: String,
}

pub fn run(args: AddExtensionArgs, global: &GlobalArgs) -> CmdResult<FixReport> {
    let sniffer = ContentSniffer::with_limit(global.defaults.sniff.limit);
    let report = extension_fix::fix_extension(&expand_path(&args.path), &sniffer)?;
    Ok((report, 0))
}
