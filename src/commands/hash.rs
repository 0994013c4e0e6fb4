use clap::Args;

use scriptkit::hasher::{self, FileDigest};
use scriptkit::io::expand_path;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct HashArgs {
    /// File to hash
    #[arg(short, long)]
    pub file: String,
}

pub fn run(args: HashArgs, _global: &GlobalArgs) -> CmdResult<FileDigest> {
    let digest = hasher::hash_file(&expand_path(&args.file))?;
    Ok((digest, 0))
}
