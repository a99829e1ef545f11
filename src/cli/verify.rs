//! `verify` command

use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

use crate::verify::verify_dir;

/// At least one folder failed verification
#[derive(Debug, Error)]
#[error("{0} folder(s) failed verification")]
pub struct VerifyFailed(pub usize);

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// .appiconset / .imageset folders to check
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let mut failed = 0;

    for dir in &args.dirs {
        let report = match verify_dir(dir) {
            Ok(report) => report,
            Err(e) => {
                failed += 1;
                println!("FAILED: {}", dir.display());
                println!("  {:#}", e);
                continue;
            }
        };
        if report.is_ok() {
            println!("OK: {} ({} images)", report.dir.display(), report.checked);
        } else {
            failed += 1;
            println!("FAILED: {}", report.dir.display());
            for issue in &report.issues {
                println!("  {}", issue);
            }
        }
    }

    if failed > 0 {
        return Err(VerifyFailed(failed).into());
    }
    Ok(())
}
